//! Iced application adapter (thin UI layer)

use iced::{Element, Task, Theme};
use tracing::info;

use crate::model::{App, Message, Settings};
use crate::quiz::CountryRecord;
use crate::strings;
use crate::update;
use crate::view;

pub fn new(catalog: Vec<CountryRecord>, settings: Settings) -> (App, Task<Message>) {
    let mut app = App::new(catalog, settings);
    info!(
        countries = app.catalog.len(),
        questions = app.settings.questions_per_round,
        "App created, starting first round"
    );
    let task = update::start_round(&mut app);
    (app, task)
}

pub fn title(_app: &App) -> String {
    String::from(strings::WINDOW_TITLE)
}

pub fn theme(_app: &App) -> Theme {
    Theme::Dark
}

pub fn update(app: &mut App, message: Message) -> Task<Message> {
    update::update(app, message)
}

pub fn view(app: &App) -> Element<'_, Message> {
    view::main_view(app)
}
