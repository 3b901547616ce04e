//! Declarative schema descriptors handed to the host.
//!
//! Attributes carry their mode (required, optional, computed) and the
//! validators the host shows to users. Controllers evaluate the same
//! validators on planned state before issuing any remote call.

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    String,
    Bool,
    Int32,
    Int64,
    List(Box<AttributeKind>),
    Set(Box<AttributeKind>),
}

impl AttributeKind {
    pub fn list_of(kind: AttributeKind) -> Self {
        AttributeKind::List(Box::new(kind))
    }

    pub fn set_of(kind: AttributeKind) -> Self {
        AttributeKind::Set(Box::new(kind))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
    /// Optional in configuration, filled by the server when omitted.
    OptionalComputed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    Single,
    List,
    Set,
}

/// Value constraint evaluated at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    OneOf(&'static [&'static str]),
    SizeAtMost(usize),
    SizeAtLeast(usize),
    /// Okta Resource Name: `orn:okta:idp:...` with at least six segments.
    Orn,
    NonEmpty,
}

pub const ORN_PREFIX: &str = "orn:okta:idp:";
const ORN_MIN_SEGMENTS: usize = 6;

impl Validator {
    /// Checks a scalar string. Size validators do not apply to scalars.
    pub fn check_str(&self, value: &str) -> Result<(), String> {
        match self {
            Validator::OneOf(allowed) => {
                if allowed.contains(&value) {
                    Ok(())
                } else {
                    Err(format!(
                        "value must be one of [{}], got {value:?}",
                        allowed.join(", ")
                    ))
                }
            }
            Validator::Orn => {
                let segments = value.split(':').count();
                if value.starts_with(ORN_PREFIX) && segments >= ORN_MIN_SEGMENTS {
                    Ok(())
                } else {
                    Err(format!(
                        "value must be an ORN starting with {ORN_PREFIX:?} with at least {ORN_MIN_SEGMENTS} segments, got {value:?}"
                    ))
                }
            }
            Validator::NonEmpty => {
                if value.is_empty() {
                    Err("value must not be empty".to_string())
                } else {
                    Ok(())
                }
            }
            Validator::SizeAtMost(_) | Validator::SizeAtLeast(_) => Ok(()),
        }
    }

    /// Checks the element count of a list or set.
    pub fn check_len(&self, len: usize) -> Result<(), String> {
        match *self {
            Validator::SizeAtMost(max) if len > max => {
                Err(format!("list must contain at most {max} elements, got {len}"))
            }
            Validator::SizeAtLeast(min) if len < min => {
                Err(format!("list must contain at least {min} elements, got {len}"))
            }
            _ => Ok(()),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Validator::OneOf(allowed) => format!("one of: {}", allowed.join(", ")),
            Validator::SizeAtMost(max) => format!("at most {max} elements"),
            Validator::SizeAtLeast(min) => format!("at least {min} elements"),
            Validator::Orn => format!("an ORN starting with {ORN_PREFIX}"),
            Validator::NonEmpty => "a non-empty string".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub mode: AttributeMode,
    pub sensitive: bool,
    pub description: &'static str,
    pub validators: Vec<Validator>,
}

impl Attribute {
    fn new(name: &'static str, kind: AttributeKind, mode: AttributeMode) -> Self {
        Self {
            name,
            kind,
            mode,
            sensitive: false,
            description: "",
            validators: Vec::new(),
        }
    }

    pub fn required(name: &'static str, kind: AttributeKind) -> Self {
        Self::new(name, kind, AttributeMode::Required)
    }

    pub fn optional(name: &'static str, kind: AttributeKind) -> Self {
        Self::new(name, kind, AttributeMode::Optional)
    }

    pub fn computed(name: &'static str, kind: AttributeKind) -> Self {
        Self::new(name, kind, AttributeMode::Computed)
    }

    pub fn optional_computed(name: &'static str, kind: AttributeKind) -> Self {
        Self::new(name, kind, AttributeMode::OptionalComputed)
    }

    /// The standard computed string `id`.
    pub fn id() -> Self {
        Self::computed("id", AttributeKind::String).with_description("Server-assigned identifier.")
    }

    #[must_use]
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn is_computed(&self) -> bool {
        matches!(
            self.mode,
            AttributeMode::Computed | AttributeMode::OptionalComputed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: &'static str,
    pub nesting: Nesting,
    pub attributes: Vec<Attribute>,
    pub blocks: Vec<Block>,
    pub validators: Vec<Validator>,
}

impl Block {
    fn new(name: &'static str, nesting: Nesting) -> Self {
        Self {
            name,
            nesting,
            attributes: Vec::new(),
            blocks: Vec::new(),
            validators: Vec::new(),
        }
    }

    pub fn single(name: &'static str) -> Self {
        Self::new(name, Nesting::Single)
    }

    pub fn list(name: &'static str) -> Self {
        Self::new(name, Nesting::List)
    }

    pub fn set(name: &'static str) -> Self {
        Self::new(name, Nesting::Set)
    }

    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Nested `[{id}]` list block, the most common shape in this API.
    pub fn id_list(name: &'static str) -> Self {
        Self::list(name).attribute(Attribute::required("id", AttributeKind::String))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
    pub blocks: Vec<Block>,
}

impl Schema {
    pub fn new(description: &'static str) -> Self {
        Self {
            description,
            attributes: Vec::new(),
            blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Looks up an attribute by dotted path. List indices (`[0]`) are ignored.
    pub fn find_attribute(&self, path: &str) -> Option<&Attribute> {
        let names: Vec<&str> = path
            .split('.')
            .map(|part| part.split('[').next().unwrap_or(part))
            .collect();
        let (last, parents) = names.split_last()?;
        if parents.is_empty() {
            return self.attributes.iter().find(|a| a.name == *last);
        }
        let block = self.find_block_by_names(parents)?;
        block.attributes.iter().find(|a| a.name == *last)
    }

    pub fn find_block(&self, path: &str) -> Option<&Block> {
        let names: Vec<&str> = path
            .split('.')
            .map(|part| part.split('[').next().unwrap_or(part))
            .collect();
        self.find_block_by_names(&names)
    }

    fn find_block_by_names(&self, names: &[&str]) -> Option<&Block> {
        let (first, rest) = names.split_first()?;
        let mut block = self.blocks.iter().find(|b| b.name == *first)?;
        for name in rest {
            block = block.blocks.iter().find(|b| b.name == *name)?;
        }
        Some(block)
    }

    pub fn is_computed(&self, name: &str) -> bool {
        self.find_attribute(name).is_some_and(Attribute::is_computed)
    }

    /// Top-level attribute names that the server always fills.
    pub fn computed_attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes
            .iter()
            .filter(|a| a.mode == AttributeMode::Computed)
            .map(|a| a.name)
    }

    /// Runs the validators declared for `path` against a string value.
    ///
    /// `path` may carry list indices; they are kept in the reported error.
    pub fn check_str(&self, path: &str, value: &str) -> Result<(), Error> {
        let Some(attribute) = self.find_attribute(path) else {
            return Ok(());
        };
        for validator in &attribute.validators {
            validator
                .check_str(value)
                .map_err(|message| Error::validation(path, message))?;
        }
        Ok(())
    }

    /// Runs size validators declared for the attribute or block at `path`.
    pub fn check_len(&self, path: &str, len: usize) -> Result<(), Error> {
        let validators = match self.find_attribute(path) {
            Some(attribute) => &attribute.validators,
            None => match self.find_block(path) {
                Some(block) => &block.validators,
                None => return Ok(()),
            },
        };
        for validator in validators {
            validator
                .check_len(len)
                .map_err(|message| Error::validation(path, message))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new("sample")
            .attribute(Attribute::id())
            .attribute(
                Attribute::optional("status", AttributeKind::String)
                    .with_validator(Validator::OneOf(&["ACTIVE", "INACTIVE"])),
            )
            .block(
                Block::single("outer").block(
                    Block::list("inner")
                        .with_validator(Validator::SizeAtMost(1))
                        .attribute(
                            Attribute::required("orn", AttributeKind::String)
                                .with_validator(Validator::Orn),
                        ),
                ),
            )
    }

    #[test]
    fn orn_requires_prefix_and_six_segments() {
        assert!(Validator::Orn.check_str("orn:okta:idp:x").is_err());
        assert!(Validator::Orn.check_str("orn:okta:idp:a:b:c").is_ok());
        assert!(Validator::Orn.check_str("orn:other:idp:a:b:c").is_err());
    }

    #[test]
    fn nested_lookup_ignores_indices() {
        let schema = sample();
        let attr = schema.find_attribute("outer.inner[3].orn").expect("attribute");
        assert_eq!(attr.validators, vec![Validator::Orn]);
        let err = schema
            .check_str("outer.inner[3].orn", "orn:okta:idp:x")
            .expect_err("invalid orn");
        match err {
            Error::Validation { path, .. } => assert_eq!(path, "outer.inner[3].orn"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn one_of_and_size_validators() {
        let schema = sample();
        assert!(schema.check_str("status", "ACTIVE").is_ok());
        assert!(schema.check_str("status", "PAUSED").is_err());
        assert!(schema.check_len("outer.inner", 1).is_ok());
        assert!(schema.check_len("outer.inner", 2).is_err());
    }

    #[test]
    fn computed_attributes_are_reported() {
        let schema = sample();
        assert!(schema.is_computed("id"));
        assert!(!schema.is_computed("status"));
        assert_eq!(schema.computed_attributes().collect::<Vec<_>>(), vec!["id"]);
    }
}
