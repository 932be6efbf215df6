#[derive(Debug)]
pub struct RandlogError {
	message: String,
}

impl RandlogError {
	pub fn new(message: &str) -> Self {
		RandlogError {
			message: message.to_string(),
		}
	}
}

impl std::fmt::Display for RandlogError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.message)
	}
}

impl std::error::Error for RandlogError {}

impl From<std::io::Error> for RandlogError {
	fn from(error: std::io::Error) -> Self {
		RandlogError::new(&error.to_string())
	}
}
