//! Shared test fixtures for ingest tests.
//!
//! `ClassFileBuilder` writes minimal class files so the bytecode reader and
//! the merge step can be tested without a JDK.

/// Assembles just enough of a class file for the reader.
#[derive(Default)]
pub struct ClassFileBuilder {
    pool: Vec<Vec<u8>>,
    access: u16,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
    fields: Vec<Vec<u8>>,
    methods: Vec<Vec<u8>>,
}

impl ClassFileBuilder {
    pub fn new(internal_name: &str) -> Self {
        let mut builder = Self {
            access: 0x0021,
            ..Self::default()
        };
        builder.this_class = builder.class(internal_name);
        builder.super_class = builder.class("java/lang/Object");
        builder
    }

    fn push(&mut self, entry: Vec<u8>) -> u16 {
        self.pool.push(entry);
        u16::try_from(self.pool.len()).unwrap()
    }

    fn utf8(&mut self, value: &str) -> u16 {
        let mut entry = vec![1];
        entry.extend(u16::try_from(value.len()).unwrap().to_be_bytes());
        entry.extend(value.as_bytes());
        self.push(entry)
    }

    fn class(&mut self, internal_name: &str) -> u16 {
        let name = self.utf8(internal_name);
        let mut entry = vec![7];
        entry.extend(name.to_be_bytes());
        self.push(entry)
    }

    pub fn access(mut self, access: u16) -> Self {
        self.access = access;
        self
    }

    pub fn extends(mut self, internal_name: &str) -> Self {
        self.super_class = self.class(internal_name);
        self
    }

    pub fn implements(mut self, internal_name: &str) -> Self {
        let index = self.class(internal_name);
        self.interfaces.push(index);
        self
    }

    fn member(&mut self, access: u16, name: &str, descriptor: &str, annotations: &[&str]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend(access.to_be_bytes());
        out.extend(self.utf8(name).to_be_bytes());
        out.extend(self.utf8(descriptor).to_be_bytes());
        if annotations.is_empty() {
            out.extend(0u16.to_be_bytes());
            return out;
        }
        let mut body = Vec::new();
        body.extend(u16::try_from(annotations.len()).unwrap().to_be_bytes());
        for annotation in annotations {
            body.extend(self.utf8(annotation).to_be_bytes());
            // one element: value = "x"
            body.extend(1u16.to_be_bytes());
            body.extend(self.utf8("value").to_be_bytes());
            body.push(b's');
            body.extend(self.utf8("x").to_be_bytes());
        }
        out.extend(1u16.to_be_bytes());
        out.extend(self.utf8("RuntimeVisibleAnnotations").to_be_bytes());
        out.extend(u32::try_from(body.len()).unwrap().to_be_bytes());
        out.extend(body);
        out
    }

    pub fn field(mut self, access: u16, name: &str, descriptor: &str, annotations: &[&str]) -> Self {
        let field = self.member(access, name, descriptor, annotations);
        self.fields.push(field);
        self
    }

    pub fn method(mut self, name: &str, annotations: &[&str]) -> Self {
        let method = self.member(0x0001, name, "()V", annotations);
        self.methods.push(method);
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        // A long constant exercises the two-slot rule.
        self.push(vec![5, 0, 0, 0, 0, 0, 0, 0, 1]);
        self.pool.push(Vec::new());

        let mut out = Vec::new();
        out.extend(0xCAFE_BABEu32.to_be_bytes());
        out.extend([0, 0, 0, 61]);
        out.extend(u16::try_from(self.pool.len() + 1).unwrap().to_be_bytes());
        for entry in &self.pool {
            out.extend(entry);
        }
        out.extend(self.access.to_be_bytes());
        out.extend(self.this_class.to_be_bytes());
        out.extend(self.super_class.to_be_bytes());
        out.extend(u16::try_from(self.interfaces.len()).unwrap().to_be_bytes());
        for interface in &self.interfaces {
            out.extend(interface.to_be_bytes());
        }
        for members in [&self.fields, &self.methods] {
            out.extend(u16::try_from(members.len()).unwrap().to_be_bytes());
            for member in members {
                out.extend(member);
            }
        }
        out.extend(0u16.to_be_bytes());
        out
    }
}
