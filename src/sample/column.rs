//! Typed attribute columns.
//! A column stores the values of one attribute for every example.
use fixedbitset::FixedBitSet;
use serde::{Serialize, Deserialize};

use std::fmt;
use std::collections::HashMap;

use crate::error::{Result, TreeError};


/// The type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    /// `0`/`1` values.
    Binary,
    /// A value out of a finite, ordered list of labels.
    Discrete,
    /// A floating-point value.
    Continuous,
}


impl AttributeKind {
    /// Parse the one-character tag used by SSV files
    /// (`b`, `d` or `c`).
    pub fn from_tag(tag: char, attribute: usize) -> Result<Self> {
        match tag {
            'b' => Ok(Self::Binary),
            'd' => Ok(Self::Discrete),
            'c' => Ok(Self::Continuous),
            _ => Err(TreeError::UnknownAttributeType { attribute, tag }),
        }
    }


    /// Returns the SSV tag of this kind.
    pub fn tag(&self) -> char {
        match self {
            Self::Binary => 'b',
            Self::Discrete => 'd',
            Self::Continuous => 'c',
        }
    }
}


impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Binary => "binary",
            Self::Discrete => "discrete",
            Self::Continuous => "continuous",
        };

        write!(f, "{name}")
    }
}


/// A single attribute value read out of a [`Column`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Value of a binary attribute.
    Binary(bool),
    /// Index into the label list of a discrete attribute.
    Discrete(usize),
    /// Value of a continuous attribute.
    Continuous(f64),
}


impl Value {
    /// Returns the kind of attribute this value belongs to.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Binary(_) => AttributeKind::Binary,
            Self::Discrete(_) => AttributeKind::Discrete,
            Self::Continuous(_) => AttributeKind::Continuous,
        }
    }
}


/// Column storage, one variant per [`AttributeKind`].
/// The variant is fixed when the column is loaded,
/// so readers dispatch once per column rather than once per value.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// One bit per example.
    Binary(FixedBitSet),


    /// One label index per example.
    Discrete {
        /// Label index of each example.
        codes: Vec<usize>,
        /// The ordered label list. `codes[i] < labels.len()`.
        labels: Vec<String>,
    },


    /// One `f64` per example.
    Continuous(Vec<f64>),
}


impl Column {
    /// Construct a binary column from the given bits.
    pub fn binary<I>(values: I) -> Self
        where I: IntoIterator<Item = bool>
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let mut bits = FixedBitSet::with_capacity(values.len());
        values.into_iter()
            .enumerate()
            .for_each(|(i, v)| bits.set(i, v));

        Self::Binary(bits)
    }


    /// Construct a discrete column from label indices and the label list.
    /// This method panics if an index is out of range.
    pub fn discrete<S>(codes: Vec<usize>, labels: Vec<S>) -> Self
        where S: ToString
    {
        let labels = labels.into_iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        assert!(
            codes.iter().all(|&c| c < labels.len()),
            "A discrete code is out of the label range"
        );

        Self::Discrete { codes, labels }
    }


    /// Construct a discrete column from raw tokens.
    /// Labels are numbered in order of first appearance.
    pub fn discrete_from_tokens<I, S>(tokens: I) -> Self
        where I: IntoIterator<Item = S>,
              S: AsRef<str>,
    {
        let mut interner = LabelInterner::default();
        let codes = tokens.into_iter()
            .map(|token| interner.intern(token.as_ref()))
            .collect::<Vec<_>>();

        Self::Discrete { codes, labels: interner.into_labels() }
    }


    /// Construct a continuous column.
    pub fn continuous(values: Vec<f64>) -> Self {
        Self::Continuous(values)
    }


    /// Returns the kind of this column.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Binary(_) => AttributeKind::Binary,
            Self::Discrete { .. } => AttributeKind::Discrete,
            Self::Continuous(_) => AttributeKind::Continuous,
        }
    }


    /// Returns the number of examples in this column.
    pub fn len(&self) -> usize {
        match self {
            Self::Binary(bits) => bits.len(),
            Self::Discrete { codes, .. } => codes.len(),
            Self::Continuous(values) => values.len(),
        }
    }


    /// Returns `true` if this column holds no example.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Returns the number of branches a test on this column creates.
    /// Continuous columns are always split in two.
    pub fn n_branches(&self) -> usize {
        match self {
            Self::Binary(_) | Self::Continuous(_) => 2,
            Self::Discrete { labels, .. } => labels.len(),
        }
    }


    /// Returns the label list of a discrete column.
    pub fn labels(&self) -> Option<&[String]> {
        match self {
            Self::Discrete { labels, .. } => Some(&labels[..]),
            _ => None,
        }
    }


    /// Read the value of the `index`-th example.
    #[inline]
    pub fn read(&self, index: usize) -> Value {
        match self {
            Self::Binary(bits) => Value::Binary(bits.contains(index)),
            Self::Discrete { codes, .. } => Value::Discrete(codes[index]),
            Self::Continuous(values) => Value::Continuous(values[index]),
        }
    }


    /// Overwrite the value of the `index`-th example.
    /// This method panics if `value` does not match the column kind.
    pub fn write(&mut self, index: usize, value: Value) {
        match (self, value) {
            (Self::Binary(bits), Value::Binary(v)) => {
                bits.set(index, v);
            },
            (Self::Discrete { codes, labels }, Value::Discrete(v)) => {
                assert!(v < labels.len(), "A discrete code is out of range");
                codes[index] = v;
            },
            (Self::Continuous(values), Value::Continuous(v)) => {
                values[index] = v;
            },
            (column, value) => {
                panic!(
                    "Cannot write a {} value into a {} column",
                    value.kind(),
                    column.kind(),
                );
            },
        }
    }


    /// Append the values of `other` at the end of `self`.
    /// Discrete labels of `other` are mapped onto the labels of `self`;
    /// unseen labels are appended to the label list.
    pub(crate) fn extend_from(&mut self, other: &Column) -> Result<()> {
        match (self, other) {
            (Self::Binary(bits), Self::Binary(more)) => {
                let offset = bits.len();
                bits.grow(offset + more.len());
                more.ones().for_each(|i| bits.insert(offset + i));
            },
            (
                Self::Discrete { codes, labels },
                Self::Discrete { codes: more, labels: more_labels },
            ) => {
                let mut interner = LabelInterner::from_labels(
                    std::mem::take(labels)
                );
                let mapping = more_labels.iter()
                    .map(|label| interner.intern(label))
                    .collect::<Vec<_>>();
                codes.extend(more.iter().map(|&c| mapping[c]));
                *labels = interner.into_labels();
            },
            (Self::Continuous(values), Self::Continuous(more)) => {
                values.extend_from_slice(more);
            },
            (column, other) => {
                return Err(TreeError::IncompatibleSchema(format!(
                    "cannot append a {} column to a {} column",
                    other.kind(),
                    column.kind(),
                )));
            },
        }
        Ok(())
    }
}


/// Assigns consecutive indices to labels in order of first appearance.
#[derive(Debug, Default)]
pub(crate) struct LabelInterner {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}


impl LabelInterner {
    pub(crate) fn from_labels(labels: Vec<String>) -> Self {
        let index = labels.iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
        Self { labels, index }
    }


    pub(crate) fn intern(&mut self, label: &str) -> usize {
        if let Some(&code) = self.index.get(label) {
            return code;
        }
        let code = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), code);
        code
    }


    pub(crate) fn into_labels(self) -> Vec<String> {
        self.labels
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discrete_tokens_are_interned_in_order() {
        let column = Column::discrete_from_tokens(
            ["sunny", "rainy", "sunny", "cloudy"]
        );
        assert_eq!(column.n_branches(), 3);
        assert_eq!(column.read(2), Value::Discrete(0));
        assert_eq!(column.read(3), Value::Discrete(2));
        assert_eq!(
            column.labels().unwrap(),
            &["sunny".to_string(), "rainy".into(), "cloudy".into()][..]
        );
    }


    #[test]
    fn extend_remaps_discrete_labels() {
        let mut a = Column::discrete_from_tokens(["x", "y"]);
        let b = Column::discrete_from_tokens(["z", "x"]);
        a.extend_from(&b).unwrap();

        assert_eq!(a.len(), 4);
        assert_eq!(a.read(2), Value::Discrete(2));
        assert_eq!(a.read(3), Value::Discrete(0));
        assert_eq!(a.n_branches(), 3);
    }


    #[test]
    fn extend_appends_bits() {
        let mut a = Column::binary([true, false]);
        let b = Column::binary([false, true, true]);
        a.extend_from(&b).unwrap();

        let bits = (0..a.len())
            .map(|i| a.read(i))
            .collect::<Vec<_>>();
        assert_eq!(
            bits,
            vec![
                Value::Binary(true),
                Value::Binary(false),
                Value::Binary(false),
                Value::Binary(true),
                Value::Binary(true),
            ]
        );
    }


    #[test]
    fn write_overwrites_in_place() {
        let mut column = Column::continuous(vec![1.0, 2.0]);
        column.write(1, Value::Continuous(5.0));
        assert_eq!(column.read(1), Value::Continuous(5.0));
    }


    #[test]
    fn mismatched_kinds_cannot_be_appended() {
        let mut a = Column::continuous(vec![1.0]);
        let b = Column::binary([true]);
        assert!(a.extend_from(&b).is_err());
    }


    #[test]
    fn unknown_tag_is_rejected() {
        let err = AttributeKind::from_tag('x', 3).unwrap_err();
        assert!(matches!(
            err,
            TreeError::UnknownAttributeType { attribute: 3, tag: 'x' }
        ));
    }
}
