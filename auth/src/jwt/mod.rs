pub mod claims;
pub mod errors;
pub mod handler;
pub mod settings;

pub use claims::Claims;
pub use claims::TokenType;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use settings::TokenSettings;
