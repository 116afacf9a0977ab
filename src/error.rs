pub type ChessgifResult<T> = Result<T, ChessgifError>;

#[derive(thiserror::Error, Debug)]
pub enum ChessgifError {
    #[error("missing sprite for piece '{0}'")]
    AssetMissing(String),

    #[error("malformed square '{0}'")]
    MalformedSquare(String),

    #[error("cannot assemble a gif from an empty frame sequence")]
    EmptyFrameSequence,

    #[error("gif encoding error: {0}")]
    Encoding(String),

    #[error("pgn parse error: {0}")]
    Parse(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChessgifError {
    pub fn asset_missing(msg: impl Into<String>) -> Self {
        Self::AssetMissing(msg.into())
    }

    pub fn malformed_square(msg: impl Into<String>) -> Self {
        Self::MalformedSquare(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn illegal_move(msg: impl Into<String>) -> Self {
        Self::IllegalMove(msg.into())
    }

    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }
}
