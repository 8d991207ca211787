//! Schema definitions.
//!
//! A schema is a graph of [`ObjectSchema`] nodes whose fields carry rule
//! primitives, nested nodes or sequences of nodes. [`Schema`] is the entry
//! point for building one.
//!
//! ```rust
//! use bidcheck::{FieldPath, Membership, Schema, SchemaLike};
//! use serde_json::json;
//!
//! let banner = Schema::object("Banner")
//!     .optional("format", Schema::array(
//!         Schema::object("Format")
//!             .field("w", Schema::positive_int())
//!             .field("h", Schema::positive_int()),
//!     ))
//!     .optional("pos", Schema::int_range(0, 7))
//!     .optional("api", Schema::int_array_enum([1, 2, 3, 4, 5, 6], Membership::All));
//!
//! let result = banner.validate(&json!({"pos": 1, "api": [3, 5]}), &FieldPath::root());
//! assert!(result.is_success());
//! ```

mod array;
mod constraint;
mod cross_field;
mod numeric;
mod object;
mod string;
mod traits;

pub use array::{ArraySchema, IntArraySchema, Membership, StringArraySchema};
pub use constraint::{is_empty, FieldCheck, FieldConstraint, Optionality, Rule};
pub use cross_field::CrossFieldRule;
pub use numeric::NumberSchema;
pub use object::ObjectSchema;
pub use string::StringSchema;
pub use traits::SchemaLike;

use std::sync::Arc;

/// Factory for schema nodes and rule primitives.
pub struct Schema;

impl Schema {
    /// An empty node for the entity type `name`.
    pub fn object(name: impl Into<String>) -> ObjectSchema {
        ObjectSchema::new(name)
    }

    /// A sequence of `item` nodes.
    pub fn array(item: impl Into<Arc<ObjectSchema>>) -> ArraySchema {
        ArraySchema::new(item)
    }

    /// No check beyond presence.
    pub fn unconstrained() -> FieldCheck {
        FieldCheck::Unconstrained
    }

    /// Any integer.
    pub fn integer() -> NumberSchema {
        NumberSchema::int()
    }

    /// Integer in `[min, max]`.
    pub fn int_range(min: i64, max: i64) -> NumberSchema {
        NumberSchema::int_range(min, max)
    }

    pub fn non_negative_int() -> NumberSchema {
        NumberSchema::non_negative_int()
    }

    pub fn positive_int() -> NumberSchema {
        NumberSchema::positive_int()
    }

    /// Real number `>= 0`.
    pub fn non_negative_number() -> NumberSchema {
        NumberSchema::non_negative_number()
    }

    /// Any string.
    pub fn string() -> StringSchema {
        StringSchema::any()
    }

    /// List of strings.
    pub fn string_array() -> StringArraySchema {
        StringArraySchema::new()
    }

    /// String drawn from `allowed`.
    pub fn string_enum<I, S>(allowed: I, case_insensitive: bool) -> StringSchema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StringSchema::one_of(allowed, case_insensitive)
    }

    /// List of integer codes drawn from `allowed`.
    pub fn int_array_enum(
        allowed: impl IntoIterator<Item = i64>,
        mode: Membership,
    ) -> IntArraySchema {
        IntArraySchema::new(allowed, mode)
    }

    pub fn ipv4() -> StringSchema {
        StringSchema::ipv4()
    }

    pub fn uuid_v4() -> StringSchema {
        StringSchema::uuid_v4()
    }
}
