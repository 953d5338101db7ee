use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimBotError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Unknown event kind: {0}")]
    UnknownEventKind(String),

    #[error("Room {room} is not a target for {kind}")]
    RoomNotTargeted { kind: String, room: String },

    #[error("{kind} is not handled by the {category} controller")]
    CategoryMismatch { kind: String, category: String },

    #[error("A {0} event is already live")]
    EventAlreadyLive(String),

    #[error("Simulation runtime stopped: {0}")]
    RuntimeStopped(String),
}

pub type Result<T> = std::result::Result<T, SimBotError>;
