//! RecordService: generic CRUD using the safe SQL builder; SchemaIntrospector: catalog reflection.

mod crud;
mod introspect;
mod validation;
pub use crud::{RecordService, DEFAULT_LIMIT, MAX_LIMIT};
pub use introspect::SchemaIntrospector;
pub use validation::PayloadValidator;
