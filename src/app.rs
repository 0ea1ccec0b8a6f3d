use crate::config::GameConfig;
use crate::game::{Game, LevelInfo, LevelSet, Transition};
use crate::util::get_display_area;
use crate::warning::{error_chain, Warning, WarningOutcome};
use log::{info, warn};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// The outer loop, playing each level in turn until the user quits
#[derive(Clone, Debug)]
pub(crate) struct App {
    levels: LevelSet,
    settings: GameConfig,
    /// Index into `levels` of the level being played
    current: usize,
    screen: Screen,
}

impl App {
    pub(crate) fn new(levels: LevelSet, settings: GameConfig) -> App {
        let mut app = App {
            levels,
            settings,
            current: 0,
            screen: Screen::Quit,
        };
        app.start_level(0);
        app
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        info!("Quitting");
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Warning(ref warning) => {
                terminal.draw(|frame| {
                    frame.render_widget(warning, get_display_area(frame.area()));
                })?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        match self.screen {
            Screen::Game(ref mut game) => {
                if let Some(transition) = game.process_input()? {
                    self.transition(transition);
                }
            }
            Screen::Warning(_) => match Warning::process_input()? {
                Some(WarningOutcome::Dismissed) => self.transition(Transition::NextLevel),
                Some(WarningOutcome::Quit) => self.transition(Transition::Quit),
                None => (),
            },
            Screen::Quit => (),
        }
        Ok(())
    }

    fn transition(&mut self, transition: Transition) {
        match transition {
            Transition::Restart => self.start_level(self.current),
            Transition::NextLevel => self.start_level(self.levels.next_index(self.current)),
            Transition::Quit => self.screen = Screen::Quit,
        }
    }

    /// Load the level at `index` and switch to it, or to a warning if it
    /// can't be loaded
    fn start_level(&mut self, index: usize) {
        self.current = index;
        let Some(source) = self.levels.get(index) else {
            self.screen = Screen::Quit;
            return;
        };
        let name = source.name().into_owned();
        self.screen = match source.load() {
            Ok(level) => {
                info!("Starting level {} ({name:?})", index.saturating_add(1));
                let info = LevelInfo {
                    name,
                    number: index.saturating_add(1),
                    total: self.levels.len(),
                };
                Screen::Game(Game::new(level, info, self.settings))
            }
            Err(e) => {
                warn!("Failed to load level {name:?}: {}", error_chain(&e).join(": "));
                Screen::Warning(Warning::from(e))
            }
        };
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Clone, Debug)]
enum Screen {
    Game(Game),
    Warning(Warning),
    Quit,
}
