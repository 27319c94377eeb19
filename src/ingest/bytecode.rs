//! Minimal JVM class-file reader.
//!
//! Only the parts needed to describe a class are decoded: its name, super
//! class, interfaces, fields and methods with their annotations. Code
//! attributes are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::{Result, TestcopError};
use crate::model::Field;

const MAGIC: u32 = 0xCAFE_BABE;

const ACC_STATIC: u16 = 0x0008;
const ACC_INTERFACE: u16 = 0x0200;
const ACC_SYNTHETIC: u16 = 0x1000;
const ACC_ANNOTATION: u16 = 0x2000;
const ACC_MODULE: u16 = 0x8000;

const VISIBLE_ANNOTATIONS: &str = "RuntimeVisibleAnnotations";
const INVISIBLE_ANNOTATIONS: &str = "RuntimeInvisibleAnnotations";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassFormatError {
    #[error("not a class file (magic {0:#010x})")]
    BadMagic(u32),

    #[error("unexpected end of class file")]
    Truncated,

    #[error("unknown constant pool tag {0}")]
    UnknownConstant(u8),

    #[error("constant pool index {0} is not a {1}")]
    BadIndex(u16, &'static str),

    #[error("unknown annotation element tag {0:?}")]
    UnknownElement(char),
}

type FormatResult<T> = std::result::Result<T, ClassFormatError>;

/// A method as far as test discovery is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMethod {
    pub name: String,
    /// Simple names of the method's annotations.
    pub annotations: Vec<String>,
    pub is_synthetic: bool,
}

/// Decoded class file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledClass {
    /// Dotted binary name (`com.example.FooTest`).
    pub fqn: String,
    pub path: PathBuf,
    pub access: u16,
    /// Dotted super class name; `None` for `java.lang.Object` itself.
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<CompiledMethod>,
}

impl CompiledClass {
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.fqn.rsplit('.').next().unwrap_or(&self.fqn)
    }

    #[must_use]
    pub fn package(&self) -> &str {
        self.fqn.rsplit_once('.').map_or("", |(package, _)| package)
    }

    /// Interfaces, annotation types and modules never hold tests.
    #[must_use]
    pub const fn is_type_declaration(&self) -> bool {
        self.access & (ACC_INTERFACE | ACC_ANNOTATION | ACC_MODULE) == 0
    }

    /// Inner, anonymous and `package-info`/`module-info` classes.
    #[must_use]
    pub fn is_auxiliary(&self) -> bool {
        let name = self.simple_name();
        name.contains('$') || name == "package-info" || name == "module-info"
    }
}

/// Read and decode a `.class` file.
///
/// # Errors
/// Returns [`TestcopError::FileRead`] if the file cannot be read and
/// [`TestcopError::Parse`] if it is not a well-formed class file.
pub fn parse_file(path: &Path) -> Result<CompiledClass> {
    let bytes = fs::read(path).map_err(|e| TestcopError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_bytes(&bytes, path).map_err(|e| TestcopError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Decode class-file bytes attributed to `path`.
///
/// # Errors
/// Returns a [`ClassFormatError`] describing the first malformed structure.
pub fn parse_bytes(bytes: &[u8], path: &Path) -> FormatResult<CompiledClass> {
    let mut reader = Reader::new(bytes);
    let magic = reader.u32()?;
    if magic != MAGIC {
        return Err(ClassFormatError::BadMagic(magic));
    }
    reader.skip(4)?; // minor and major version
    let pool = ConstantPool::read(&mut reader)?;

    let access = reader.u16()?;
    let fqn = pool.class_name(reader.u16()?)?;
    let super_index = reader.u16()?;
    let super_name = if super_index == 0 {
        None
    } else {
        Some(pool.class_name(super_index)?)
    };
    let interface_count = reader.u16()?;
    let interfaces = (0..interface_count)
        .map(|_| pool.class_name(reader.u16()?))
        .collect::<FormatResult<Vec<_>>>()?;

    let fields = (0..reader.u16()?)
        .map(|_| read_member(&mut reader, &pool))
        .filter_map(|member| match member {
            Ok(member) if member.access & ACC_SYNTHETIC != 0 => None,
            Ok(member) => Some(Ok(member.into_field())),
            Err(e) => Some(Err(e)),
        })
        .collect::<FormatResult<Vec<_>>>()?;
    let methods = (0..reader.u16()?)
        .map(|_| read_member(&mut reader, &pool).map(Member::into_method))
        .collect::<FormatResult<Vec<_>>>()?;

    Ok(CompiledClass {
        fqn,
        path: path.to_path_buf(),
        access,
        super_name,
        interfaces,
        fields,
        methods,
    })
}

/// Simple name from an annotation descriptor (`Lorg/junit/jupiter/api/Test;`).
fn annotation_simple_name(descriptor: &str) -> String {
    let internal = descriptor
        .strip_prefix('L')
        .and_then(|d| d.strip_suffix(';'))
        .unwrap_or(descriptor);
    internal
        .rsplit(['/', '$'])
        .next()
        .unwrap_or(internal)
        .to_string()
}

/// Java type as written from a field descriptor (`[Ljava/lang/String;` ->
/// `java.lang.String[]`).
#[must_use]
pub fn descriptor_type(descriptor: &str) -> String {
    let dimensions = descriptor.chars().take_while(|c| *c == '[').count();
    let element = &descriptor[dimensions..];
    let base = match element {
        "B" => "byte".to_string(),
        "C" => "char".to_string(),
        "D" => "double".to_string(),
        "F" => "float".to_string(),
        "I" => "int".to_string(),
        "J" => "long".to_string(),
        "S" => "short".to_string(),
        "Z" => "boolean".to_string(),
        "V" => "void".to_string(),
        other => other
            .strip_prefix('L')
            .and_then(|o| o.strip_suffix(';'))
            .unwrap_or(other)
            .replace(['/', '$'], "."),
    };
    format!("{base}{}", "[]".repeat(dimensions))
}

struct Member {
    access: u16,
    name: String,
    descriptor: String,
    annotations: Vec<String>,
}

impl Member {
    fn into_field(self) -> Field {
        let mut field = Field::new(self.name, descriptor_type(&self.descriptor))
            .static_field(self.access & ACC_STATIC != 0);
        field.annotations = self.annotations;
        field
    }

    fn into_method(self) -> CompiledMethod {
        CompiledMethod {
            name: self.name,
            annotations: self.annotations,
            is_synthetic: self.access & ACC_SYNTHETIC != 0,
        }
    }
}

fn read_member(reader: &mut Reader<'_>, pool: &ConstantPool) -> FormatResult<Member> {
    let access = reader.u16()?;
    let name = pool.utf8(reader.u16()?)?.to_string();
    let descriptor = pool.utf8(reader.u16()?)?.to_string();
    let mut annotations = Vec::new();
    for _ in 0..reader.u16()? {
        let attribute = pool.utf8(reader.u16()?)?;
        let length = usize::try_from(reader.u32()?).map_err(|_| ClassFormatError::Truncated)?;
        let body = reader.bytes(length)?;
        if attribute == VISIBLE_ANNOTATIONS || attribute == INVISIBLE_ANNOTATIONS {
            annotations.extend(read_annotations(&mut Reader::new(body), pool)?);
        }
    }
    Ok(Member {
        access,
        name,
        descriptor,
        annotations,
    })
}

fn read_annotations(reader: &mut Reader<'_>, pool: &ConstantPool) -> FormatResult<Vec<String>> {
    (0..reader.u16()?)
        .map(|_| read_annotation(reader, pool))
        .collect()
}

fn read_annotation(reader: &mut Reader<'_>, pool: &ConstantPool) -> FormatResult<String> {
    let name = annotation_simple_name(pool.utf8(reader.u16()?)?);
    for _ in 0..reader.u16()? {
        reader.skip(2)?; // element name
        skip_element_value(reader, pool)?;
    }
    Ok(name)
}

fn skip_element_value(reader: &mut Reader<'_>, pool: &ConstantPool) -> FormatResult<()> {
    let tag = char::from(reader.u8()?);
    match tag {
        'B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z' | 's' | 'c' => reader.skip(2),
        'e' => reader.skip(4),
        '@' => read_annotation(reader, pool).map(drop),
        '[' => {
            for _ in 0..reader.u16()? {
                skip_element_value(reader, pool)?;
            }
            Ok(())
        }
        other => Err(ClassFormatError::UnknownElement(other)),
    }
}

/// Big-endian cursor over class-file bytes.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn bytes(&mut self, len: usize) -> FormatResult<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(ClassFormatError::Truncated)?;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(ClassFormatError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> FormatResult<()> {
        self.bytes(len).map(drop)
    }

    fn u8(&mut self) -> FormatResult<u8> {
        Ok(self.bytes(1)?[0])
    }

    fn u16(&mut self) -> FormatResult<u16> {
        let b = self.bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> FormatResult<u32> {
        let b = self.bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

#[derive(Debug)]
enum Constant {
    Utf8(String),
    Class(u16),
    /// Unused slot (index 0 and the upper half of longs and doubles).
    Empty,
    Other,
}

struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    fn read(reader: &mut Reader<'_>) -> FormatResult<Self> {
        let count = usize::from(reader.u16()?);
        let mut entries = Vec::with_capacity(count);
        entries.push(Constant::Empty);
        while entries.len() < count {
            let tag = reader.u8()?;
            let constant = match tag {
                1 => {
                    let len = usize::from(reader.u16()?);
                    Constant::Utf8(String::from_utf8_lossy(reader.bytes(len)?).into_owned())
                }
                7 => Constant::Class(reader.u16()?),
                8 | 16 | 19 | 20 => reader.skip(2).map(|()| Constant::Other)?,
                15 => reader.skip(3).map(|()| Constant::Other)?,
                3 | 4 | 9 | 10 | 11 | 12 | 17 | 18 => reader.skip(4).map(|()| Constant::Other)?,
                5 | 6 => {
                    reader.skip(8)?;
                    entries.push(Constant::Other);
                    Constant::Empty
                }
                other => return Err(ClassFormatError::UnknownConstant(other)),
            };
            entries.push(constant);
        }
        Ok(Self { entries })
    }

    fn utf8(&self, index: u16) -> FormatResult<&str> {
        match self.entries.get(usize::from(index)) {
            Some(Constant::Utf8(value)) => Ok(value),
            _ => Err(ClassFormatError::BadIndex(index, "Utf8")),
        }
    }

    /// Dotted class name behind a `Class` constant.
    fn class_name(&self, index: u16) -> FormatResult<String> {
        match self.entries.get(usize::from(index)) {
            Some(Constant::Class(name)) => Ok(self.utf8(*name)?.replace('/', ".")),
            _ => Err(ClassFormatError::BadIndex(index, "Class")),
        }
    }
}

#[cfg(test)]
#[path = "bytecode_tests.rs"]
mod tests;
