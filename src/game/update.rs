use crate::config::OUTRO_TIME;
use crate::input::{Button, InputSnapshot};

use super::{bullets, enemy, player, Game, GameMode, Scene};

pub(super) const MENU_OPTIONS: [&str; 5] =
    ["1 Player", "2 Players", "Level Select", "Construction", "Quit"];

impl Game {
    pub fn update(&mut self, dt: f32, input: &InputSnapshot) {
        match self.scene {
            Scene::MainMenu => self.update_main_menu(input),
            Scene::Intro(mode) => {
                self.scene_timer -= dt;
                if self.scene_timer <= 0.0 {
                    self.scene = Scene::Playing(mode);
                }
            }
            Scene::Playing(mode) => self.update_playing(mode, dt, input),
            Scene::Outro(mode) => {
                self.scene_timer -= dt;
                if self.scene_timer <= 0.0 {
                    self.stage += 1;
                    if self.stage >= self.levels.len() {
                        log::info!("all stages cleared");
                        self.scene = Scene::Victory(mode);
                    } else {
                        self.enter_intro(mode);
                    }
                }
            }
            Scene::Construction => {
                if input.was_pressed(Button::Cancel) {
                    self.scene = Scene::MainMenu;
                } else {
                    self.construction.update(&self.templates, input);
                }
            }
            Scene::LevelSelect => self.update_level_select(input),
            Scene::GameOver(mode) => {
                if input.was_pressed(Button::Confirm) {
                    self.stage = 0;
                    self.enter_intro(mode);
                } else if input.was_pressed(Button::Cancel) {
                    self.scene = Scene::MainMenu;
                }
            }
            Scene::Victory(mode) => {
                if input.was_pressed(Button::Confirm) {
                    self.stage = 0;
                    self.enter_intro(mode);
                } else if input.was_pressed(Button::Cancel) {
                    self.stage = 0;
                    self.scene = Scene::MainMenu;
                }
            }
        }
    }

    fn update_main_menu(&mut self, input: &InputSnapshot) {
        if input.was_pressed(Button::P1Up) {
            self.menu_choice = (self.menu_choice + MENU_OPTIONS.len() - 1) % MENU_OPTIONS.len();
        }
        if input.was_pressed(Button::P1Down) {
            self.menu_choice = (self.menu_choice + 1) % MENU_OPTIONS.len();
        }
        if input.was_pressed(Button::Cancel) {
            self.quit = true;
        }
        if !input.was_pressed(Button::Confirm) {
            return;
        }
        match self.menu_choice {
            0 => {
                self.stage = 0;
                self.enter_intro(GameMode::OnePlayer);
            }
            1 => {
                self.stage = 0;
                self.enter_intro(GameMode::TwoPlayers);
            }
            2 => {
                self.preview = self.stage.min(self.levels.len() - 1);
                self.scene = Scene::LevelSelect;
            }
            3 => self.scene = Scene::Construction,
            _ => self.quit = true,
        }
    }

    fn update_level_select(&mut self, input: &InputSnapshot) {
        let count = self.levels.len();
        if input.was_pressed(Button::P1Right) || input.was_pressed(Button::P1Down) {
            self.preview = (self.preview + 1) % count;
        }
        if input.was_pressed(Button::P1Left) || input.was_pressed(Button::P1Up) {
            self.preview = (self.preview + count - 1) % count;
        }
        if input.was_pressed(Button::Confirm) {
            self.stage = self.preview;
            self.enter_intro(GameMode::OnePlayer);
        } else if input.was_pressed(Button::Cancel) {
            self.scene = Scene::MainMenu;
        }
    }

    /// One gameplay frame. The subsystem order is fixed and load-bearing:
    /// players move first, bullets resolve against this frame's tank
    /// positions, enemy decisions see bullets already advanced, and
    /// destroyed entities are compacted only after everything ran.
    fn update_playing(&mut self, mode: GameMode, dt: f32, input: &InputSnapshot) {
        if input.was_pressed(Button::Cancel) {
            log::info!("gameplay abandoned, back to menu");
            self.scene = Scene::MainMenu;
            return;
        }

        player::update_players(&mut self.battlefield, &self.templates, input, dt);
        bullets::update_bullets(&mut self.battlefield, &self.templates, dt);
        enemy::update_enemies(&mut self.battlefield, &self.templates, &mut self.rng, dt);

        self.battlefield.update_effects(dt);
        self.battlefield.compact();

        if self.battlefield.all_players_out() {
            self.battlefield.arm_lose_timer(crate::config::LOSE_DELAY);
        }

        if let Some(timer) = &mut self.battlefield.lose_timer {
            *timer -= dt;
            if *timer <= 0.0 {
                log::info!("stage {} lost", self.stage + 1);
                self.scene = Scene::GameOver(mode);
            }
            return;
        }
        if let Some(timer) = &mut self.battlefield.win_timer {
            *timer -= dt;
            if *timer <= 0.0 {
                log::info!("stage {} cleared", self.stage + 1);
                self.scene_timer = OUTRO_TIME;
                self.scene = Scene::Outro(mode);
            }
        }
    }
}
