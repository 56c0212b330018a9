pub mod codegen;
pub mod error;
pub mod model;
pub mod notation;
pub mod path;
pub mod settings;

pub use codegen::ObjectCodeGenerator;
pub use codegen::literal::{DeclarationLiterals, LiteralRenderer};
pub use error::{AccessError, InputError, Level, SnapcodeErrorExt};
pub use model::{GraphDocument, Introspector, MemberDescriptor, Mutator, ObjectGraph, ObjectId, Scalar, Shape, Value};
pub use path::{MemberPath, Segment};
pub use settings::{GenCodeRequest, OutputFormat, Settings};

pub fn generate_error_report<E: SnapcodeErrorExt + ?Sized>(error: &E) -> String {
    let level = error.level();
    let path = match error.path() {
        Some(path) => path.to_string(),
        None => "unknown path".to_string(),
    };
    let message = error.message();

    format!("SNAPCODE | {} | {} | {}", level, path, message)
}

/// Render `root` as source text that rebuilds it, in the format the request's
/// settings select.
pub fn generate(
    root: &Value,
    types: &dyn Introspector,
    request: &GenCodeRequest,
) -> Result<String, Box<dyn SnapcodeErrorExt>> {
    let out = match request.settings.format {
        OutputFormat::Native => ObjectCodeGenerator::new(root, types, request).gen_code()?,
        OutputFormat::Json => notation::render_notation(root, types, &request.settings)?,
    };
    Ok(out)
}

/// Load a graph document and render its root.
pub fn generate_from_document(text: &str, request: &GenCodeRequest) -> Result<String, Box<dyn SnapcodeErrorExt>> {
    let (graph, root) = GraphDocument::from_json(text)?.into_graph()?;
    generate(&root, &graph, request)
}
