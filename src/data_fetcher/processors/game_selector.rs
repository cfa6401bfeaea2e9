use crate::data_fetcher::models::Game;
use chrono::{Local, NaiveDate};
use tracing::debug;

/// Picks the game the widget should show, using today's date on the local clock.
///
/// See [`select_relevant_game_on`] for the rules.
pub fn select_relevant_game(games: &[Game]) -> Option<&Game> {
    select_relevant_game_on(games, Local::now().date_naive())
}

/// Picks the most relevant game from a list. First match wins:
///
/// 1. the first live game, wherever it sits in the list
/// 2. the first game scheduled on `today` (local calendar day)
/// 3. the first game in the list
///
/// Returns `None` only for an empty list.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use startpage_scoreboard::data_fetcher::processors::select_relevant_game_on;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert!(select_relevant_game_on(&[], today).is_none());
/// ```
pub fn select_relevant_game_on(games: &[Game], today: NaiveDate) -> Option<&Game> {
    if let Some(live) = games.iter().find(|game| game.is_live()) {
        debug!("Selected live game {}", live.id);
        return Some(live);
    }

    if let Some(todays) = games
        .iter()
        .find(|game| game.scheduled.local_date() == today)
    {
        debug!("Selected today's game {}", todays.id);
        return Some(todays);
    }

    let first = games.first();
    if let Some(game) = first {
        debug!("Selected first available game {}", game.id);
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::{GameStatus, ScheduledAt};
    use crate::testing_utils::TestDataBuilder;

    fn on_date(id: &str, status: GameStatus, date: NaiveDate) -> Game {
        let mut game = TestDataBuilder::create_basketball_game(id, status);
        game.scheduled = ScheduledAt::Date(date);
        game
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_live_game_wins_regardless_of_position() {
        let today = day(10);
        let games = vec![
            on_date("a", GameStatus::Completed, day(8)),
            on_date("b", GameStatus::Scheduled, today),
            on_date("c", GameStatus::Live, day(9)),
        ];
        assert_eq!(select_relevant_game_on(&games, today).unwrap().id, "c");
    }

    #[test]
    fn test_first_live_game_when_several() {
        let games = vec![
            on_date("a", GameStatus::Live, day(1)),
            on_date("b", GameStatus::Live, day(1)),
        ];
        assert_eq!(select_relevant_game_on(&games, day(1)).unwrap().id, "a");
    }

    #[test]
    fn test_todays_game_without_live() {
        let today = day(10);
        let games = vec![
            on_date("a", GameStatus::Completed, day(8)),
            on_date("b", GameStatus::Scheduled, day(12)),
            on_date("c", GameStatus::Scheduled, today),
        ];
        assert_eq!(select_relevant_game_on(&games, today).unwrap().id, "c");
    }

    #[test]
    fn test_todays_game_matched_on_local_day_of_instant() {
        let today = day(10);
        let mut game = TestDataBuilder::create_football_game("x", GameStatus::Scheduled);
        game.scheduled = TestDataBuilder::local_noon(today);
        let games = vec![on_date("a", GameStatus::Completed, day(2)), game];
        assert_eq!(select_relevant_game_on(&games, today).unwrap().id, "x");
    }

    #[test]
    fn test_falls_back_to_first_game() {
        let games = vec![
            on_date("a", GameStatus::Completed, day(8)),
            on_date("b", GameStatus::Scheduled, day(12)),
        ];
        assert_eq!(select_relevant_game_on(&games, day(10)).unwrap().id, "a");
    }

    #[test]
    fn test_empty_list_selects_nothing() {
        assert!(select_relevant_game_on(&[], day(10)).is_none());
    }
}
