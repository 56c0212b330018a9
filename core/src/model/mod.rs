pub mod document;
pub mod graph;
pub mod introspect;
pub mod value;

pub use document::GraphDocument;
pub use graph::ObjectGraph;
pub use introspect::{Introspector, MemberDescriptor, Mutator, Shape};
pub use value::{ObjectId, Scalar, Value};
