use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category {
  atom: String,
  features: BTreeMap<String, String>,
}

impl Category {
  pub fn atomic(atom: impl Into<String>) -> Self {
    Category {
      atom: atom.into(),
      features: BTreeMap::new(),
    }
  }

  pub fn with_features<I, K, V>(atom: impl Into<String>, features: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    Category {
      atom: atom.into(),
      features: features.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
    }
  }

  pub fn atom(&self) -> &str {
    &self.atom
  }

  pub fn features(&self) -> &BTreeMap<String, String> {
    &self.features
  }

  pub fn feature(&self, key: &str) -> Option<&str> {
    self.features.get(key).map(String::as_str)
  }

  pub fn extend(&self, key: &str, value: &str) -> Category {
    let mut features = self.features.clone();
    features.insert(key.to_string(), value.to_string());
    Category {
      atom: self.atom.clone(),
      features,
    }
  }

  /// For each key, copies the donor's value onto the result if the donor
  /// has one; keys the donor lacks are skipped rather than erroring.
  pub fn extend_with(&self, keys: &[String], donor: &Category) -> Category {
    let mut features = self.features.clone();
    for key in keys {
      if let Some(value) = donor.feature(key) {
        features.insert(key.clone(), value.to_string());
      }
    }
    Category {
      atom: self.atom.clone(),
      features,
    }
  }

  /// True if `self` and `other` share an atom and every feature binding on
  /// `self` is also present with the same value on `other`. A bare category
  /// (no features) subsumes anything with a matching atom, since it adds no
  /// constraints of its own.
  pub fn subsumes(&self, other: &Category) -> bool {
    if self.atom != other.atom {
      return false;
    }
    self.features.iter().all(|(k, v)| other.features.get(k) == Some(v))
  }

  /// Two categories clash if they share an atom but disagree on the value
  /// of some feature key. A missing key never clashes with a present one.
  pub fn clashes(&self, other: &Category) -> bool {
    if self.atom != other.atom {
      return false;
    }
    self.features.iter().any(|(k, v)| matches!(other.features.get(k), Some(ov) if ov != v))
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.features.is_empty() {
      return write!(f, "{}", self.atom);
    }
    write!(f, "{}[", self.atom)?;
    for (i, (k, v)) in self.features.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}:{}", k, v)?;
    }
    write!(f, "]")
  }
}
