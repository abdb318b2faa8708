use derive_more::From;

#[derive(From, thiserror::Error, Debug)]
pub enum Error {
    #[error("Parse Error: {}", _0)]
    Parse(async_graphql::parser::Error),

    #[error("Variable `{}` is not supported in selection arguments", _0)]
    #[from(ignore)]
    UnsupportedVariable(String),

    #[error("Unsupported selection: {}", _0)]
    #[from(ignore)]
    UnsupportedSelection(String),

    #[error("The passthrough sentinel `_` names no endpoint and cannot be a top-level selection")]
    TopLevelPassthrough,

    #[error("Serde Json Error: {}", _0)]
    SerdeJson(serde_json::Error),

    #[error("URL Parse Error: {}", _0)]
    UrlParse(url::ParseError),

    #[error("Transport Error: {}", _0)]
    Transport(anyhow::Error),
}

pub type Result<A> = std::result::Result<A, Error>;
