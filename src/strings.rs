//! Fixed Polish UI strings.

pub const WINDOW_TITLE: &str = "Flagi świata";
pub const INPUT_PLACEHOLDER: &str = "Nazwa kraju";
pub const CHECK: &str = "Sprawdź";
pub const IDK: &str = "Nie wiem";
pub const NEXT: &str = "Dalej";
pub const SEE_RESULT: &str = "Zobacz wynik";
pub const CORRECT: &str = "Dobrze!";
pub const EMPTY_PROMPT: &str = "Wpisz odpowiedź";
pub const CORRECT_HEADER: &str = "Poprawne odpowiedzi";
pub const WRONG_HEADER: &str = "Błędne odpowiedzi";
pub const NO_ANSWER: &str = "<brak>";
pub const RESTART: &str = "Zagraj ponownie";
pub const FALLBACK_NOTICE: &str = "Nie udało się wczytać listy krajów, używam listy awaryjnej";

pub fn question(number: usize, total: usize) -> String {
    format!("Pytanie {number}/{total}")
}

pub fn wrong(canonical: &str) -> String {
    format!("Źle! Poprawna odpowiedź: {canonical}")
}

pub fn result(score: usize, total: usize) -> String {
    format!("Wynik: {score}/{total}")
}

pub fn correct_label(name: &str) -> String {
    format!("Poprawnie: {name}")
}

pub fn your_label(answer: &str) -> String {
    format!("Twoja odpowiedź: {answer}")
}

pub fn round_error(details: &str) -> String {
    format!("Nie można rozpocząć rundy: {details}")
}
