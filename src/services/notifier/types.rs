/// Prefix of every failure notification sent to the chat.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Coarse error classes the polling loop branches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed settings, fatal at startup
    Configuration,
    /// Network failure or undecodable body, degrades to an empty cycle
    Transport,
    /// Non-200 answer or a payload of the wrong shape
    Protocol,
    /// The chat could not be reached
    Delivery,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("Отсутствует обязательная переменная окружения: \"{0}\"")]
    MissingVariable(&'static str),
    #[error("Некорректное значение переменной окружения \"{0}\": {1}")]
    InvalidVariable(&'static str, String),
    #[error("Ошибка соединения с API: {0}")]
    Transport(String),
    #[error("Сервер не доступен: код ответа {0}")]
    UnexpectedStatus(u16),
    #[error("Ответ API не является словарём")]
    ResponseNotObject,
    #[error("В ответе API отсутствует ключ homeworks")]
    MissingHomeworks,
    #[error("Ключ homeworks в ответе API не является списком")]
    HomeworksNotList,
    #[error("Домашняя работа в ответе API не является словарём")]
    HomeworkNotObject,
    #[error("Некорректное значение поля {0} в ответе API")]
    InvalidField(&'static str),
    #[error("В домашней работе отсутствует поле {0}")]
    MissingField(&'static str),
    #[error("Недокументированный статус домашней работы: {0}")]
    UnknownStatus(String),
    #[error("Нет новых домашних работ")]
    NoNewHomeworks,
    #[error("Не удалось отправить сообщение в Telegram: {0}")]
    Delivery(String),
}

impl NotifierError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingVariable(_) | Self::InvalidVariable(..) => ErrorKind::Configuration,
            Self::Transport(_) => ErrorKind::Transport,
            Self::UnexpectedStatus(_)
            | Self::ResponseNotObject
            | Self::MissingHomeworks
            | Self::HomeworksNotList
            | Self::HomeworkNotObject
            | Self::InvalidField(_)
            | Self::MissingField(_)
            | Self::UnknownStatus(_)
            | Self::NoNewHomeworks => ErrorKind::Protocol,
            Self::Delivery(_) => ErrorKind::Delivery,
        }
    }

    /// Text of the failure notification for this error
    pub fn failure_message(&self) -> String {
        format!("{}: {}", FAILURE_PREFIX, self)
    }
}

/// What a single polling cycle ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status message was delivered
    Notified(String),
    /// The API answered with nothing new
    NoUpdates,
    /// Transport failed, the cycle was treated as empty
    Skipped,
}

/// Result of one loop iteration including failure handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: Result<CycleOutcome, String>,
    pub failure_notified: bool,
}
