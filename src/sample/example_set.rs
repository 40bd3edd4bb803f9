use polars::prelude::*;

use std::collections::HashMap;
use std::ops::Index;

use super::column::*;
use super::membership::MembershipSet;
use crate::error::{Result, TreeError};


/// Struct `ExampleSet` holds `n_examples` examples
/// of `n_attributes` typed attributes, column by column.
///
/// Attribute `0` is the binary class label;
/// attributes `1..n_attributes` are the candidates for splitting.
/// An `ExampleSet` is never modified by tree growing, evaluation
/// or pruning.
#[derive(Debug, Clone)]
pub struct ExampleSet {
    pub(super) names: Vec<String>,
    pub(super) columns: Vec<Column>,
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) n_examples: usize,
}


impl ExampleSet {
    /// Construct a new `ExampleSet` from named columns.
    /// The first column is the class label and must be binary.
    ///
    /// This method panics if the number of names differs from
    /// the number of columns, or if no column is given.
    pub fn new<I, S>(names: I, columns: Vec<Column>) -> Result<Self>
        where I: IntoIterator<Item = S>,
              S: ToString,
    {
        let names = names.into_iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            names.len(), columns.len(),
            "Each column needs exactly one name"
        );
        assert!(!columns.is_empty(), "An example set needs a target column");


        let kind = columns[0].kind();
        if kind != AttributeKind::Binary {
            return Err(TreeError::TargetNotBinary { kind });
        }


        let n_examples = columns[0].len();
        for (attribute, column) in columns.iter().enumerate() {
            if column.len() != n_examples {
                return Err(TreeError::LengthMismatch {
                    attribute,
                    expected: n_examples,
                    found: column.len(),
                });
            }
            if let Column::Continuous(values) = column {
                let bad = values.iter().position(|v| !v.is_finite());
                if let Some(example) = bad {
                    return Err(TreeError::NonFiniteValue {
                        example,
                        attribute,
                        value: values[example],
                    });
                }
            }
        }


        let name_to_index = names.iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Ok(Self { names, columns, name_to_index, n_examples })
    }


    /// Convert a `polars::DataFrame` into an `ExampleSet`.
    /// The column named `target` becomes attribute `0`;
    /// the remaining columns keep their order.
    ///
    /// - boolean columns become binary attributes,
    /// - string columns become discrete attributes,
    /// - numeric columns become continuous attributes.
    ///
    /// The target must be boolean, or numeric with values in `{0, 1}`.
    pub fn from_dataframe<S>(data: &DataFrame, target: S) -> Result<Self>
        where S: AsRef<str>
    {
        let target = target.as_ref();
        let target_series = data.column(target)?;
        let target_column = target_from_series(target_series)?;

        let mut names = vec![target.to_string()];
        let mut columns = vec![target_column];
        for series in data.get_columns() {
            if series.name() == target { continue; }

            names.push(series.name().to_string());
            columns.push(column_from_series(series)?);
        }

        Self::new(names, columns)
    }


    /// Returns the pair of the number of examples and
    /// the number of attributes (target included).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_examples, self.columns.len())
    }


    /// Returns the number of examples.
    #[inline]
    pub fn n_examples(&self) -> usize {
        self.n_examples
    }


    /// Returns the number of attributes, target included.
    #[inline]
    pub fn n_attributes(&self) -> usize {
        self.columns.len()
    }


    /// Returns the attribute names.
    pub fn names(&self) -> &[String] {
        &self.names[..]
    }


    /// Returns the name of the `attribute`-th attribute.
    #[inline]
    pub fn name(&self, attribute: usize) -> &str {
        &self.names[attribute]
    }


    /// Returns the index of the attribute named `name`.
    pub fn position<S: AsRef<str>>(&self, name: S) -> Option<usize> {
        self.name_to_index.get(name.as_ref()).copied()
    }


    /// Returns the kind of the `attribute`-th attribute.
    #[inline]
    pub fn kind(&self, attribute: usize) -> AttributeKind {
        self.columns[attribute].kind()
    }


    /// Returns the `attribute`-th column.
    #[inline]
    pub fn column(&self, attribute: usize) -> &Column {
        &self.columns[attribute]
    }


    /// Returns every column.
    pub fn columns(&self) -> &[Column] {
        &self.columns[..]
    }


    /// Returns the number of values of a discrete attribute,
    /// and `0` for binary and continuous attributes.
    pub fn n_discrete_values(&self, attribute: usize) -> usize {
        match &self.columns[attribute] {
            Column::Discrete { labels, .. } => labels.len(),
            _ => 0,
        }
    }


    /// Returns the class label of the `example`-th example.
    #[inline]
    pub fn label(&self, example: usize) -> bool {
        match &self.columns[0] {
            Column::Binary(bits) => bits.contains(example),
            _ => unreachable!("The target column is checked on construction"),
        }
    }


    /// Count the positive and negative members of `members`.
    pub fn count_labels(&self, members: &MembershipSet) -> (usize, usize) {
        let n_positive = members.iter()
            .filter(|&i| self.label(i))
            .count();
        let n_negative = members.count_set() - n_positive;
        (n_positive, n_negative)
    }


    /// Returns a membership set that contains every example.
    pub fn all(&self) -> MembershipSet {
        MembershipSet::full(self.n_examples)
    }


    /// Returns a new `ExampleSet` holding the examples of `self`
    /// followed by the examples of `other`.
    ///
    /// Both sets must have the same attribute names and kinds.
    /// Discrete labels of `other` are mapped onto those of `self`;
    /// labels that `self` has never seen are appended.
    pub fn merge(&self, other: &ExampleSet) -> Result<Self> {
        if self.names != other.names {
            return Err(TreeError::IncompatibleSchema(format!(
                "attribute names differ: [{}] vs [{}]",
                self.names.join(", "),
                other.names.join(", "),
            )));
        }


        let mut columns = self.columns.clone();
        for (column, more) in columns.iter_mut().zip(&other.columns) {
            column.extend_from(more)?;
        }


        Ok(Self {
            names: self.names.clone(),
            columns,
            name_to_index: self.name_to_index.clone(),
            n_examples: self.n_examples + other.n_examples,
        })
    }
}


impl<S> Index<S> for ExampleSet
    where S: AsRef<str>
{
    type Output = Column;


    fn index(&self, name: S) -> &Self::Output {
        let name = name.as_ref();
        let k = *self.name_to_index.get(name)
            .unwrap_or_else(|| panic!("The attribute `{name}` does not exist"));
        &self.columns[k]
    }
}


fn target_from_series(series: &Series) -> Result<Column> {
    check_no_missing(series)?;
    match series.dtype() {
        DataType::Boolean => column_from_series(series),
        dtype if dtype.is_numeric() => {
            let values = series.cast(&DataType::Float64)?;
            let values = values.f64()?;
            let mut bits = Vec::with_capacity(values.len());
            for (example, value) in values.into_no_null_iter().enumerate() {
                if value == 0.0 {
                    bits.push(false);
                } else if value == 1.0 {
                    bits.push(true);
                } else {
                    return Err(TreeError::NonBinaryValue {
                        example,
                        attribute: 0,
                        value: value.to_string(),
                    });
                }
            }
            Ok(Column::binary(bits))
        },
        DataType::Utf8 => {
            Err(TreeError::TargetNotBinary { kind: AttributeKind::Discrete })
        },
        dtype => {
            Err(TreeError::IncompatibleSchema(format!(
                "the target `{}` has unsupported dtype {dtype}",
                series.name(),
            )))
        },
    }
}


fn column_from_series(series: &Series) -> Result<Column> {
    check_no_missing(series)?;
    let column = match series.dtype() {
        DataType::Boolean => {
            let bits = series.bool()?
                .into_no_null_iter()
                .collect::<Vec<_>>();
            Column::binary(bits)
        },
        DataType::Utf8 => {
            let tokens = series.utf8()?
                .into_no_null_iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>();
            Column::discrete_from_tokens(tokens)
        },
        dtype if dtype.is_numeric() => {
            let values = series.cast(&DataType::Float64)?;
            let values = values.f64()?
                .into_no_null_iter()
                .collect::<Vec<_>>();
            Column::continuous(values)
        },
        dtype => {
            return Err(TreeError::IncompatibleSchema(format!(
                "the column `{}` has unsupported dtype {dtype}",
                series.name(),
            )));
        },
    };
    Ok(column)
}


fn check_no_missing(series: &Series) -> Result<()> {
    if series.null_count() > 0 {
        return Err(TreeError::MissingValue {
            attribute: series.name().to_string(),
        });
    }
    Ok(())
}
