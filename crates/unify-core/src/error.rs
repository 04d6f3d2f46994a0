use unify_map::MapError;
use unify_schema::SchemaError;

#[derive(Debug, thiserror::Error)]
pub enum UnifyError {
    #[error("unknown interface: {name}")]
    UnknownInterface { name: String },

    #[error(transparent)]
    Catalog(#[from] SchemaError),

    #[error(transparent)]
    Aliases(#[from] MapError),
}
