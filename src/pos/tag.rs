use std::fmt;

/// Penn-Treebank-style part-of-speech tag.
///
/// The set is closed; anything a tagger produces outside of it becomes
/// [`Tag::Unknown`]. Variants are ordered by declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    /// Personal pronoun (`they`, `i`).
    Prp,
    /// Possessive pronoun (`their`).
    PrpPossessive,
    /// Noun, singular or mass.
    Nn,
    /// Noun, plural.
    Nns,
    /// Proper noun, singular.
    Nnp,
    /// Proper noun, plural.
    Nnps,
    /// Verb, base form.
    Vb,
    /// Verb, non-3rd person singular present.
    Vbp,
    /// Verb, 3rd person singular present.
    Vbz,
    /// Verb, past tense.
    Vbd,
    /// Verb, gerund or present participle.
    Vbg,
    /// Verb, past participle.
    Vbn,
    Jj,
    Jjr,
    Jjs,
    Rb,
    Rbr,
    Rp,
    Md,
    Dt,
    Cc,
    In,
    To,
    Cd,
    Ex,
    Uh,
    Wdt,
    Wp,
    Wrb,
    Pos,
    /// Base form of a lexical verb in the TreeTagger tag set.
    Vv,
    /// `have` in present, non-3rd person, TreeTagger tag set.
    Vhp,
    Unknown,
}

impl Tag {
    /// Parse a tagger label; unrecognized labels map to [`Tag::Unknown`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "PRP" => Self::Prp,
            "PRP$" => Self::PrpPossessive,
            "NN" => Self::Nn,
            "NNS" => Self::Nns,
            "NNP" => Self::Nnp,
            "NNPS" => Self::Nnps,
            "VB" => Self::Vb,
            "VBP" => Self::Vbp,
            "VBZ" => Self::Vbz,
            "VBD" => Self::Vbd,
            "VBG" => Self::Vbg,
            "VBN" => Self::Vbn,
            "JJ" => Self::Jj,
            "JJR" => Self::Jjr,
            "JJS" => Self::Jjs,
            "RB" => Self::Rb,
            "RBR" => Self::Rbr,
            "RP" => Self::Rp,
            "MD" => Self::Md,
            "DT" => Self::Dt,
            "CC" => Self::Cc,
            "IN" => Self::In,
            "TO" => Self::To,
            "CD" => Self::Cd,
            "EX" => Self::Ex,
            "UH" => Self::Uh,
            "WDT" => Self::Wdt,
            "WP" => Self::Wp,
            "WRB" => Self::Wrb,
            "POS" => Self::Pos,
            "VV" => Self::Vv,
            "VHP" => Self::Vhp,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Prp => "PRP",
            Self::PrpPossessive => "PRP$",
            Self::Nn => "NN",
            Self::Nns => "NNS",
            Self::Nnp => "NNP",
            Self::Nnps => "NNPS",
            Self::Vb => "VB",
            Self::Vbp => "VBP",
            Self::Vbz => "VBZ",
            Self::Vbd => "VBD",
            Self::Vbg => "VBG",
            Self::Vbn => "VBN",
            Self::Jj => "JJ",
            Self::Jjr => "JJR",
            Self::Jjs => "JJS",
            Self::Rb => "RB",
            Self::Rbr => "RBR",
            Self::Rp => "RP",
            Self::Md => "MD",
            Self::Dt => "DT",
            Self::Cc => "CC",
            Self::In => "IN",
            Self::To => "TO",
            Self::Cd => "CD",
            Self::Ex => "EX",
            Self::Uh => "UH",
            Self::Wdt => "WDT",
            Self::Wp => "WP",
            Self::Wrb => "WRB",
            Self::Pos => "POS",
            Self::Vv => "VV",
            Self::Vhp => "VHP",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// True for the Penn verb tags `VB`, `VBP`, `VBZ`, `VBD`, `VBG`, `VBN`.
    #[must_use]
    pub const fn is_verb(self) -> bool {
        matches!(
            self,
            Self::Vb | Self::Vbp | Self::Vbz | Self::Vbd | Self::Vbg | Self::Vbn
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
