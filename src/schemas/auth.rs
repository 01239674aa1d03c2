use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginRequest {
	/// Username or email address
	pub identifier: String,
	pub password:   String,
}
