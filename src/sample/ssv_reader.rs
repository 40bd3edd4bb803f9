use std::path::{Path, PathBuf};
use std::fs::File;
use std::io::{BufRead, BufReader};

use super::column::*;
use super::example_set::ExampleSet;
use crate::error::{Result, TreeError};


/// A struct that reads an SSV (space separated values) file
/// into an [`ExampleSet`].
///
/// An SSV file looks as follows;
/// ```txt
/// # comment lines and blank lines are ignored
/// 4 3
/// class  windy  outlook  temperature
/// bbdc
/// 1  0  sunny   25.5
/// 0  1  rainy   12.0
/// 1  0  cloudy  18.25
/// ```
/// The first line holds the number of attributes and the number of
/// examples (`0` means "read until the end of the file").
/// The second line names the attributes,
/// the third one gives one type character per attribute
/// (`b`inary, `d`iscrete or `c`ontinuous).
/// The first attribute is the class label and must be binary.
///
/// # Example
/// ```no_run
/// use reptree::SsvReader;
/// let set = SsvReader::new()
///     .file("/path/to/file.ssv")
///     .read()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct SsvReader {
    file: Option<PathBuf>,
}


impl SsvReader {
    /// Construct a new instance of [`SsvReader`].
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the file name.
    pub fn file<P: AsRef<Path>>(mut self, file: P) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }


    /// Reads the file and returns the parsed [`ExampleSet`].
    /// This method consumes `self`.
    pub fn read(self) -> Result<ExampleSet> {
        let path = self.file.ok_or_else(|| TreeError::Format {
            line: 0,
            message: "no file is specified; call `SsvReader::file`".into(),
        })?;
        let file = File::open(&path)?;
        let set = Self::read_from(BufReader::new(file))?;
        tracing::info!(
            file = %path.display(),
            n_examples = set.n_examples(),
            n_attributes = set.n_attributes(),
            "read SSV file"
        );
        Ok(set)
    }


    /// Parse SSV text held in memory.
    pub fn parse_str(text: &str) -> Result<ExampleSet> {
        Self::read_from(text.as_bytes())
    }


    /// Parse SSV text from any buffered reader.
    pub fn read_from<R: BufRead>(reader: R) -> Result<ExampleSet> {
        let mut lines = ContentLines::new(reader);


        // Header: number of attributes and examples.
        let (line, header) = lines.expect_next()?;
        let mut words = header.split_whitespace();
        let n_attributes = parse_count(words.next(), line, "attributes")?;
        let n_examples = parse_count(words.next(), line, "examples")?;
        if n_attributes == 0 {
            return Err(TreeError::Format {
                line,
                message: "the file declares no attribute".into(),
            });
        }


        // Attribute names.
        let (line, names) = lines.expect_next()?;
        let names = names.split_whitespace()
            .take(n_attributes)
            .map(str::to_string)
            .collect::<Vec<_>>();
        if names.len() < n_attributes {
            return Err(TreeError::Format {
                line,
                message: format!(
                    "expected {n_attributes} attribute names, found {}",
                    names.len()
                ),
            });
        }


        // Type string.
        let (line, tags) = lines.expect_next()?;
        let tags = tags.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<Vec<_>>();
        if tags.len() < n_attributes {
            return Err(TreeError::Format {
                line,
                message: format!(
                    "expected {n_attributes} type characters, found {}",
                    tags.len()
                ),
            });
        }
        let mut buffers = tags.into_iter()
            .take(n_attributes)
            .enumerate()
            .map(|(attribute, tag)| {
                AttributeKind::from_tag(tag, attribute)
                    .map(ColumnBuffer::new)
            })
            .collect::<Result<Vec<_>>>()?;


        // Examples.
        let mut example = 0_usize;
        while n_examples == 0 || example < n_examples {
            let (line, row) = match lines.next_content()? {
                Some(next) => next,
                None if n_examples == 0 => break,
                None => {
                    return Err(TreeError::Format {
                        line: lines.line_number(),
                        message: format!(
                            "input terminated prematurely: \
                             expected {n_examples} examples, found {example}"
                        ),
                    });
                },
            };

            let mut tokens = row.split_whitespace();
            for (attribute, buffer) in buffers.iter_mut().enumerate() {
                let token = tokens.next()
                    .ok_or_else(|| TreeError::Format {
                        line,
                        message: format!(
                            "example {example} has no value \
                             for attribute {attribute}"
                        ),
                    })?;
                buffer.push(token, example, attribute, line)?;
            }
            example += 1;
        }

        if let Some((line, _)) = lines.next_content()? {
            return Err(TreeError::Format {
                line,
                message: "additional data at the end of the input".into(),
            });
        }


        let columns = buffers.into_iter()
            .map(ColumnBuffer::into_column)
            .collect::<Vec<_>>();

        ExampleSet::new(names, columns)
    }
}


/// Iterates over the lines that carry content:
/// blank lines and `#` comments are skipped.
struct ContentLines<R> {
    reader: R,
    line_number: usize,
    buffer: String,
}


impl<R: BufRead> ContentLines<R> {
    fn new(reader: R) -> Self {
        Self { reader, line_number: 0, buffer: String::new() }
    }


    fn line_number(&self) -> usize {
        self.line_number
    }


    fn next_content(&mut self) -> Result<Option<(usize, String)>> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            if self.buffer.starts_with('#') { continue; }
            let line = self.buffer.trim();
            if line.is_empty() { continue; }

            return Ok(Some((self.line_number, line.to_string())));
        }
    }


    fn expect_next(&mut self) -> Result<(usize, String)> {
        self.next_content()?
            .ok_or_else(|| TreeError::Format {
                line: self.line_number,
                message: "input terminated prematurely".into(),
            })
    }
}


/// Values of one attribute collected while parsing.
enum ColumnBuffer {
    Binary(Vec<bool>),
    Discrete(LabelInterner, Vec<usize>),
    Continuous(Vec<f64>),
}


impl ColumnBuffer {
    fn new(kind: AttributeKind) -> Self {
        match kind {
            AttributeKind::Binary => Self::Binary(Vec::new()),
            AttributeKind::Discrete => {
                Self::Discrete(LabelInterner::default(), Vec::new())
            },
            AttributeKind::Continuous => Self::Continuous(Vec::new()),
        }
    }


    fn push(
        &mut self,
        token: &str,
        example: usize,
        attribute: usize,
        line: usize,
    ) -> Result<()>
    {
        match self {
            Self::Binary(bits) => {
                let bit = match token {
                    "0" => false,
                    "1" => true,
                    _ => {
                        return Err(TreeError::NonBinaryValue {
                            example,
                            attribute,
                            value: token.to_string(),
                        });
                    },
                };
                bits.push(bit);
            },
            Self::Discrete(interner, codes) => {
                codes.push(interner.intern(token));
            },
            Self::Continuous(values) => {
                let value = token.parse::<f64>()
                    .map_err(|_| TreeError::Format {
                        line,
                        message: format!(
                            "attribute {attribute} of example {example} \
                             is not a number: `{token}`"
                        ),
                    })?;
                if !value.is_finite() {
                    return Err(TreeError::NonFiniteValue {
                        example,
                        attribute,
                        value,
                    });
                }
                values.push(value);
            },
        }
        Ok(())
    }


    fn into_column(self) -> Column {
        match self {
            Self::Binary(bits) => Column::binary(bits),
            Self::Discrete(interner, codes) => {
                Column::Discrete { codes, labels: interner.into_labels() }
            },
            Self::Continuous(values) => Column::continuous(values),
        }
    }
}


fn parse_count(word: Option<&str>, line: usize, what: &str)
    -> Result<usize>
{
    word.and_then(|w| w.parse::<usize>().ok())
        .ok_or_else(|| TreeError::Format {
            line,
            message: format!("the header must give the number of {what}"),
        })
}
