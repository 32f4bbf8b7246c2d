//! Update routing: decides what, if anything, the bot answers.
//!
//! Pure functions over the wire types; sending happens in the poller.

use super::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, Message, SendMessage, Update, User, WebAppInfo,
};

/// Characters of mini app data quoted back in the acknowledgement
pub const WEB_APP_DATA_PREVIEW_CHARS: usize = 100;

/// Label of the button that opens the mini app
pub const OPEN_BUTTON_LABEL: &str = "🚀 Open Mini App";

/// Bot commands the router answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Info,
    Unknown(String),
}

impl Command {
    /// Parse `/name` or `/name@botname` (arguments ignored); `None` for plain text.
    ///
    /// Returns the command together with the bot it is addressed to, if any.
    pub fn parse(text: &str) -> Option<(Self, Option<&str>)> {
        let token = text.trim_start().split_whitespace().next()?;
        let name = token.strip_prefix('/')?;
        let (name, addressee) = match name.split_once('@') {
            Some((name, bot)) => (name, Some(bot)),
            None => (name, None),
        };

        let command = match name {
            "start" => Command::Start,
            "help" => Command::Help,
            "info" => Command::Info,
            other => Command::Unknown(other.to_string()),
        };
        Some((command, addressee))
    }
}

/// What the bot does with an update
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send this reply
    Reply(SendMessage),
    /// Mini app data arrived: log it and send the acknowledgement
    WebAppData { data: String, reply: SendMessage },
}

impl Action {
    pub fn reply(&self) -> &SendMessage {
        match self {
            Action::Reply(reply) => reply,
            Action::WebAppData { reply, .. } => reply,
        }
    }
}

/// Routes updates to replies for one configured mini app URL.
#[derive(Debug, Clone)]
pub struct Router {
    webapp_url: String,
    username: Option<String>,
}

impl Router {
    pub fn new(webapp_url: impl Into<String>) -> Self {
        Self {
            webapp_url: webapp_url.into(),
            username: None,
        }
    }

    /// Set the bot's own username, as reported by `getMe`.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.set_username(username);
        self
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    pub fn webapp_url(&self) -> &str {
        &self.webapp_url
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// `/cmd@name` is ours only when `name` is our username; while the
    /// username is unknown every addressed command is left alone.
    fn is_addressed_to_us(&self, addressee: &str) -> bool {
        self.username
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(addressee))
    }

    /// Route an update; `None` means the bot stays silent.
    pub fn route(&self, update: &Update) -> Option<Action> {
        let message = update.message.as_ref()?;

        if let Some(web_app_data) = &message.web_app_data {
            return Some(Action::WebAppData {
                data: web_app_data.data.clone(),
                reply: web_app_data_reply(message.chat.id, &web_app_data.data),
            });
        }

        let text = message.text.as_deref()?;
        let reply = match Command::parse(text) {
            Some((_, Some(bot))) if !self.is_addressed_to_us(bot) => return None,
            Some((Command::Start, _)) => self.start(message),
            Some((Command::Help, _)) => help(message),
            Some((Command::Info, _)) => self.info(message),
            Some((Command::Unknown(_), _)) => return None,
            None => SendMessage::text(message.chat.id, text),
        };
        Some(Action::Reply(reply))
    }

    fn start(&self, message: &Message) -> SendMessage {
        let keyboard = InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton {
                text: OPEN_BUTTON_LABEL.to_string(),
                web_app: Some(WebAppInfo {
                    url: self.webapp_url.clone(),
                }),
            }]],
        };

        SendMessage::text(
            message.chat.id,
            "Welcome to the Telegram Mini App!\n\nClick the button below to open the Mini App:",
        )
        .with_keyboard(keyboard)
    }

    fn info(&self, message: &Message) -> SendMessage {
        let user_details = match &message.from {
            Some(user) => describe_user(user),
            None => "• Unknown sender".to_string(),
        };

        let text = format!(
            "📊 *Bot Information:*\n\n\
             *User Details:*\n\
             {user_details}\n\n\
             *Bot Details:*\n\
             • Mini App URL: {url}\n\
             • Backend: axum\n\
             • Status: Active ✅\n\n\
             *Commands Available:*\n\
             • /start - Open Mini App\n\
             • /help - Show help\n\
             • /info - Show this info",
            url = self.webapp_url,
        );

        SendMessage::text(message.chat.id, text).markdown()
    }
}

fn help(message: &Message) -> SendMessage {
    let text = "🤖 *Telegram Mini App Bot Commands:*\n\n\
                /start - Open the Mini App\n\
                /help - Show this help message\n\
                /info - Show bot information\n\n\
                *Features:*\n\
                • Interactive Mini App interface\n\
                • User data integration\n\
                • Message sending capabilities\n\
                • Theme-aware UI\n\
                • axum backend\n\n\
                *How to use:*\n\
                1. Click the \"Open Mini App\" button\n\
                2. Interact with the app interface\n\
                3. Send messages and perform actions";

    SendMessage::text(message.chat.id, text).markdown()
}

fn describe_user(user: &User) -> String {
    let name = match &user.last_name {
        Some(last) => format!("{} {}", user.first_name, last),
        None => user.first_name.clone(),
    };
    format!(
        "• Name: {name}\n• Username: @{}\n• User ID: {}",
        user.username.as_deref().unwrap_or("None"),
        user.id
    )
}

fn web_app_data_reply(chat_id: i64, data: &str) -> SendMessage {
    SendMessage::text(
        chat_id,
        format!(
            "✅ Data received from Mini App!\n\nData: {}",
            preview(data, WEB_APP_DATA_PREVIEW_CHARS)
        ),
    )
}

/// First `max_chars` characters, with `...` appended when cut.
pub fn preview(data: &str, max_chars: usize) -> String {
    match data.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &data[..cut]),
        None => data.to_string(),
    }
}
