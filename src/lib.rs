pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    CheckAvailabilityUseCase, ConverseUseCase, HttpMethod, HttpRequest, HttpResponse,
    HttpTransport, SendChatQueryUseCase, UNAVAILABLE_MESSAGE,
};

pub use cli::Commands;

pub use connector::{
    Container, ContainerConfig, ReqwestTransport, Router, ScriptedReply, ScriptedTransport,
};

pub use domain::{
    Availability, ChatRequest, ChatResponse, ChatSession, DomainError, Message, RequestTicket, Role,
    ServiceStatus, CHAT_PATH, FALLBACK_RESPONSE, GREETING, MALFORMED_ERROR, NETWORK_ERROR,
    ROOT_PATH,
};
