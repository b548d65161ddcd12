//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for tweet records.
//! NO I/O, NO async, NO storage access.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `address` | Deterministic address derivation |
//! | `codec` | Length-prefixed byte primitives |
//! | `layout` | Fixed-offset record encoding |
//! | `validation` | Topic/content size rules |
//! | `access` | Ownership proof by recomputation |
//! | `query` | Byte-level read filters |
//! | `instruction` | Instruction wire codec |

pub mod access;
pub mod address;
pub mod codec;
pub mod entities;
pub mod instruction;
pub mod layout;
pub mod query;
pub mod validation;
pub mod value_objects;

pub use access::*;
pub use address::*;
pub use entities::*;
pub use instruction::*;
pub use query::*;
pub use validation::*;
pub use value_objects::*;
