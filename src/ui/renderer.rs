//! Renderers for the terminal: a crossterm screen for interactive mode and a
//! latest-view holder for one-shot output.

use super::colors::*;
use super::header::{HeaderView, WeatherLine};
use crate::data_fetcher::models::Sport;
use crate::error::AppError;
use crate::scoreboard::{Renderer, WidgetView};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

const HEADER_ROW: u16 = 0;
const WEATHER_ROW: u16 = 3;
const WIDGET_ROW: u16 = 5;
const CONTENT_MARGIN: u16 = 2;
const KEY_HINTS: &str = "t: switch sport   r: refresh   q: quit";

/// Lines of a view paired with the color each is drawn in.
pub fn styled_lines(view: &WidgetView) -> Vec<(String, Color)> {
    let lines = view.lines();
    let mut styled = Vec::with_capacity(lines.len());
    let mut iter = lines.into_iter();
    if let Some(title) = iter.next() {
        styled.push((title, title_fg()));
    }

    match view {
        WidgetView::Game(card) => {
            for line in iter {
                let color = if line.starts_with("(cached ") {
                    muted_fg()
                } else if card.is_live && line == card.status.status_text {
                    live_fg()
                } else {
                    text_fg()
                };
                styled.push((line, color));
            }
        }
        WidgetView::Error { .. } => styled.extend(iter.map(|line| (line, error_fg()))),
        WidgetView::Loading { .. } | WidgetView::NoGames { .. } => {
            styled.extend(iter.map(|line| (line, muted_fg())))
        }
    }
    styled
}

/// Draws the header, the weather row and the scoreboard widget at fixed rows.
///
/// The last of each is kept so the whole screen can be redrawn after a resize.
pub struct TerminalRenderer<W: Write> {
    out: W,
    header: Option<HeaderView>,
    weather: Option<WeatherLine>,
    view: Option<WidgetView>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header: None,
            weather: None,
            view: None,
        }
    }

    pub fn draw_header(&mut self, header: HeaderView) -> Result<(), AppError> {
        if self.header.as_ref() == Some(&header) {
            return Ok(());
        }
        self.header = Some(header);
        self.queue_header()?;
        self.out.flush()?;
        Ok(())
    }

    /// Replaces the weather row. Leaves the scoreboard untouched.
    pub fn draw_weather(&mut self, weather: WeatherLine) -> Result<(), AppError> {
        if self.weather.as_ref() == Some(&weather) {
            return Ok(());
        }
        self.weather = Some(weather);
        self.queue_weather()?;
        self.out.flush()?;
        Ok(())
    }

    /// Clears the screen and draws everything again.
    pub fn redraw(&mut self) -> Result<(), AppError> {
        queue!(self.out, Clear(ClearType::All))?;
        self.queue_header()?;
        self.queue_weather()?;
        self.queue_widget()?;
        self.out.flush()?;
        Ok(())
    }

    pub fn current_view(&self) -> Option<&WidgetView> {
        self.view.as_ref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn queue_header(&mut self) -> Result<(), AppError> {
        let Some(header) = &self.header else {
            return Ok(());
        };
        let rows = [
            (header.greeting.to_string(), header_fg()),
            (header.clock.clone(), text_fg()),
            (header.date.clone(), muted_fg()),
        ];
        for (offset, (text, color)) in rows.into_iter().enumerate() {
            queue!(
                self.out,
                MoveTo(CONTENT_MARGIN, HEADER_ROW + offset as u16),
                Clear(ClearType::CurrentLine),
                SetForegroundColor(color),
                Print(text),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn queue_weather(&mut self) -> Result<(), AppError> {
        let Some(weather) = &self.weather else {
            return Ok(());
        };
        let color = match weather {
            WeatherLine::Report(_) => text_fg(),
            WeatherLine::Loading | WeatherLine::Unavailable => muted_fg(),
        };
        queue!(
            self.out,
            MoveTo(CONTENT_MARGIN, WEATHER_ROW),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(color),
            Print(weather.text()),
            ResetColor
        )?;
        Ok(())
    }

    fn queue_widget(&mut self) -> Result<(), AppError> {
        let Some(view) = &self.view else {
            return Ok(());
        };
        let lines = styled_lines(view);
        queue!(self.out, MoveTo(0, WIDGET_ROW), Clear(ClearType::FromCursorDown))?;
        for (offset, (text, color)) in lines.iter().enumerate() {
            queue!(
                self.out,
                MoveTo(CONTENT_MARGIN, WIDGET_ROW + offset as u16),
                SetForegroundColor(*color),
                Print(text),
                ResetColor
            )?;
        }
        let hint_row = WIDGET_ROW + lines.len() as u16 + 1;
        queue!(
            self.out,
            MoveTo(CONTENT_MARGIN, hint_row),
            SetForegroundColor(muted_fg()),
            Print(KEY_HINTS),
            ResetColor
        )?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &WidgetView) -> Result<(), AppError> {
        self.view = Some(view.clone());
        self.queue_widget()?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps only the most recent view, for printing once the fetch has settled.
#[derive(Debug, Default)]
pub struct LatestViewRenderer {
    latest: Option<WidgetView>,
}

impl LatestViewRenderer {
    pub fn latest(&self) -> Option<&WidgetView> {
        self.latest.as_ref()
    }

    /// Plain lines of the latest view; a loading view for `sport` if nothing was rendered.
    pub fn lines_or_loading(&self, sport: Sport) -> Vec<String> {
        match &self.latest {
            Some(view) => view.lines(),
            None => WidgetView::Loading { sport }.lines(),
        }
    }
}

impl Renderer for LatestViewRenderer {
    fn render(&mut self, view: &WidgetView) -> Result<(), AppError> {
        self.latest = Some(view.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::GameStatus;
    use crate::scoreboard::GameCard;
    use crate::testing_utils::TestDataBuilder;
    use chrono::Utc;

    #[test]
    fn test_render_writes_card_text() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let game = TestDataBuilder::create_basketball_game("1", GameStatus::Live);
        renderer
            .render(&WidgetView::Game(GameCard::from_game(&game, None)))
            .unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("NBA Scoreboard"));
        assert!(output.contains("HOU"));
        assert!(output.contains("Q2 5:00"));
        assert!(output.contains(KEY_HINTS));
    }

    #[test]
    fn test_header_is_not_redrawn_when_unchanged() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let now = Utc::now();
        renderer.draw_header(HeaderView::at(&now)).unwrap();
        let after_first = renderer.out.len();
        renderer.draw_header(HeaderView::at(&now)).unwrap();
        assert_eq!(renderer.out.len(), after_first);
    }

    #[test]
    fn test_weather_row_leaves_scoreboard_alone() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let view = WidgetView::fetch_error(Sport::Basketball);
        renderer.render(&view).unwrap();
        renderer.out.clear();

        renderer.draw_weather(WeatherLine::Unavailable).unwrap();
        let output = String::from_utf8(renderer.out.clone()).unwrap();
        assert!(output.contains("Weather unavailable"));
        assert!(!output.contains("Unable to load game data"));
        assert_eq!(renderer.current_view(), Some(&view));

        let before = renderer.out.len();
        renderer.draw_weather(WeatherLine::Unavailable).unwrap();
        assert_eq!(renderer.out.len(), before);

        renderer.redraw().unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("Weather unavailable"));
        assert!(output.contains("Unable to load game data"));
    }

    #[test]
    fn test_redraw_repeats_last_view() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer
            .render(&WidgetView::fetch_error(Sport::Football))
            .unwrap();
        renderer.out.clear();
        renderer.redraw().unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("Unable to load game data"));
    }

    #[test]
    fn test_styled_lines_color_errors_and_cache_marker() {
        let error = styled_lines(&WidgetView::fetch_error(Sport::Basketball));
        assert_eq!(error[0].1, title_fg());
        assert_eq!(error[1].1, error_fg());

        let game = TestDataBuilder::create_football_game("1", GameStatus::Live);
        let cached = styled_lines(&WidgetView::Game(GameCard::from_game(&game, Some(Utc::now()))));
        assert_eq!(cached.last().map(|(_, c)| *c), Some(muted_fg()));
    }

    #[test]
    fn test_latest_view_renderer() {
        let mut renderer = LatestViewRenderer::default();
        assert_eq!(
            renderer.lines_or_loading(Sport::Football)[1],
            "Loading game data..."
        );
        renderer
            .render(&WidgetView::fetch_error(Sport::Football))
            .unwrap();
        renderer
            .render(&WidgetView::Loading { sport: Sport::Football })
            .unwrap();
        assert_eq!(
            renderer.latest(),
            Some(&WidgetView::Loading { sport: Sport::Football })
        );
    }
}
