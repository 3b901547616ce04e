/// A configuration or state value as the host sees it.
///
/// `Unknown` is "not computed yet" (only ever in plans), `Null` is
/// "explicitly unset" and `Known` carries a value. Collapsing `Unknown`
/// into `Null` makes every computed attribute diff after create.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Value<T> {
    Unknown,
    #[default]
    Null,
    Known(T),
}

impl<T> Value<T> {
    pub fn known(value: impl Into<T>) -> Self {
        Value::Known(value.into())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Value::Known(_))
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Value::Known(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_known(self) -> Option<T> {
        match self {
            Value::Known(value) => Some(value),
            _ => None,
        }
    }

    /// Server-side absence reads back as `Null`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Value::Known(value),
            None => Value::Null,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Value<U> {
        match self {
            Value::Unknown => Value::Unknown,
            Value::Null => Value::Null,
            Value::Known(value) => Value::Known(f(value)),
        }
    }

    pub fn as_ref(&self) -> Value<&T> {
        match self {
            Value::Unknown => Value::Unknown,
            Value::Null => Value::Null,
            Value::Known(value) => Value::Known(value),
        }
    }

    /// Keeps `self` unless it is unknown, in which case `fallback` is used.
    pub fn or_known(self, fallback: Value<T>) -> Value<T> {
        match self {
            Value::Unknown => fallback,
            other => other,
        }
    }
}

impl<T: Copy> Value<T> {
    pub fn get(&self) -> Option<T> {
        self.as_known().copied()
    }
}

impl Value<String> {
    /// The string when it is known and non-empty; optional wire fields are
    /// omitted otherwise.
    pub fn non_empty(&self) -> Option<&str> {
        self.as_known().map(String::as_str).filter(|s| !s.is_empty())
    }

    pub fn non_empty_owned(&self) -> Option<String> {
        self.non_empty().map(str::to_string)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_known().map(String::as_str)
    }
}

impl From<&str> for Value<String> {
    fn from(value: &str) -> Self {
        Value::Known(value.to_string())
    }
}

impl<T> From<Option<T>> for Value<T> {
    fn from(value: Option<T>) -> Self {
        Value::from_option(value)
    }
}
