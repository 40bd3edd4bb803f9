//! Struct `ExampleSet` holds the examples, column by column.

/// Provides typed columns.
pub mod column;
/// Provides the membership bitset.
pub mod membership;
/// Provides example set struct.
pub mod example_set;

/// Provides a struct that reads an SSV file.
pub mod ssv_reader;
/// Provides train/prune/test partitions.
pub mod partition;


pub use column::{AttributeKind, Column, Value};
pub use membership::MembershipSet;
pub use example_set::ExampleSet;
pub use ssv_reader::SsvReader;
pub use partition::{Partition, Partitioner};
