pub type KnResult<T> = Result<T, KnError>;
pub type ParserResult<T> = KnResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnErrorCategory {
    Success,
    ParseError,
    IoSystemError,
    ShapeError,
    InternalError,
}

impl KnErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::ParseError => 2,
            Self::IoSystemError => 3,
            Self::ShapeError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::ParseError => "ParseError",
            Self::IoSystemError => "IoSystemError",
            Self::ShapeError => "ShapeError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} [{}] {}", .category.as_str(), .code, .message)]
pub struct KnError {
    category: KnErrorCategory,
    code: &'static str,
    message: String,
}

impl KnError {
    pub fn new(category: KnErrorCategory, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn parse(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(KnErrorCategory::ParseError, code, message)
    }

    pub fn shape(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(KnErrorCategory::ShapeError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(KnErrorCategory::IoSystemError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(KnErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> KnErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.code, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}
