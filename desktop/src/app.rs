use crate::settings::Settings;
use eframe::egui;
use ms_core::{Action, Effect, Key, QuestionCount, Quiz, Round, Screen, Summary, TimerQueue};
use std::time::Instant;

const DIGIT_KEYS: [(egui::Key, u8); 10] = [
    (egui::Key::Num0, 0),
    (egui::Key::Num1, 1),
    (egui::Key::Num2, 2),
    (egui::Key::Num3, 3),
    (egui::Key::Num4, 4),
    (egui::Key::Num5, 5),
    (egui::Key::Num6, 6),
    (egui::Key::Num7, 7),
    (egui::Key::Num8, 8),
    (egui::Key::Num9, 9),
];

const CORRECT_COLOR: egui::Color32 = egui::Color32::from_rgb(50, 205, 50);
const WRONG_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 20, 60);

pub struct MathSmashApp {
    quiz: Quiz,
    timers: TimerQueue,
    notice: Option<String>,
}

impl MathSmashApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        Self {
            quiz: Quiz::new(settings.config, settings.pacing, settings.policy),
            timers: TimerQueue::new(),
            notice: None,
        }
    }

    fn dispatch(&mut self, action: Action) {
        if action == Action::PlayAgain {
            self.timers.clear();
        }

        match self.quiz.dispatch(action) {
            Ok(effects) => {
                if !matches!(action, Action::Fire(_)) {
                    self.notice = None;
                }
                let now = Instant::now();
                for effect in effects {
                    match effect {
                        Effect::Schedule { after, timer } => self.timers.schedule(now, after, timer),
                    }
                }
            }
            Err(err) => {
                tracing::warn!(%err, action = action.name(), "action rejected");
                self.notice = Some(err.to_string());
            }
        }
    }

    fn run_timers(&mut self, ctx: &egui::Context) {
        for timer in self.timers.pop_due(Instant::now()) {
            self.dispatch(Action::Fire(timer));
        }
        self.wake_for_next_timer(ctx);
    }

    fn wake_for_next_timer(&self, ctx: &egui::Context) {
        if let Some(deadline) = self.timers.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }

    fn keyboard_actions(&self, ctx: &egui::Context) -> Vec<Action> {
        if !matches!(self.quiz.screen(), Screen::Playing(_)) {
            return Vec::new();
        }

        ctx.input(|i| {
            let mut actions: Vec<Action> = DIGIT_KEYS
                .iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .map(|(_, digit)| Action::Key(Key::Digit(*digit)))
                .collect();
            if i.key_pressed(egui::Key::Backspace) {
                actions.push(Action::Key(Key::Backspace));
            }
            if i.key_pressed(egui::Key::Escape) {
                actions.push(Action::Key(Key::Clear));
            }
            if i.key_pressed(egui::Key::Enter) {
                actions.push(Action::Submit);
            }
            actions
        })
    }

    fn settings_view(&self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        let config = *self.quiz.config();

        ui.label(egui::RichText::new("Choose Tables").size(28.0).strong());
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.label(format!("Up to: {}", config.max_factor.get()));
            if ui.button("-").clicked() {
                actions.push(Action::DecrementMaxFactor);
            }
            if ui.button("+").clicked() {
                actions.push(Action::IncrementMaxFactor);
            }
        });

        ui.add_space(20.0);
        ui.label(egui::RichText::new("Number of Questions").size(22.0).strong());
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            for count in QuestionCount::ALL {
                let selected = config.question_count == count;
                let label = egui::SelectableLabel::new(selected, count.get().to_string());
                if ui.add_sized([50.0, 50.0], label).clicked() {
                    actions.push(Action::SetQuestionCount(count));
                }
            }
        });

        ui.add_space(20.0);
        let feasible = config.is_feasible();
        let start = ui.add_enabled(
            feasible,
            egui::Button::new(egui::RichText::new("Start Game").strong()).min_size([200.0, 40.0].into()),
        );
        if start.clicked() {
            actions.push(Action::Start);
        }
        if !feasible {
            ui.label(format!(
                "Only {} different questions fit tables up to {}.",
                config.available_pairs(),
                config.max_factor.get()
            ));
        }
    }

    fn playing_view(round: &Round, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.label(egui::RichText::new(round.position()).size(18.0));
        ui.add_space(10.0);
        ui.label(egui::RichText::new(round.current().display()).size(48.0).strong());
        ui.add_space(15.0);

        let input = round.input().as_str();
        let shown = if input.is_empty() { "?" } else { input };
        ui.label(egui::RichText::new(shown).size(50.0).strong());
        ui.add_space(15.0);

        egui::Grid::new("keypad").spacing([15.0, 10.0]).show(ui, |ui| {
            for row in Key::LAYOUT {
                for key in row {
                    if ui.add_sized([50.0, 50.0], egui::Button::new(key.label())).clicked() {
                        actions.push(Action::Key(key));
                    }
                }
                ui.end_row();
            }
        });

        ui.add_space(15.0);
        let submit = ui.add_enabled(
            round.can_submit(),
            egui::Button::new(egui::RichText::new("Submit").strong()).min_size([140.0, 40.0].into()),
        );
        if submit.clicked() {
            actions.push(Action::Submit);
        }

        if let Some(feedback) = round.feedback() {
            ui.add_space(10.0);
            let (color, text) = if feedback.is_correct {
                (CORRECT_COLOR, feedback.text.to_string())
            } else {
                (
                    WRONG_COLOR,
                    format!("{} The answer is {}.", feedback.text, feedback.correct_answer),
                )
            };
            ui.label(egui::RichText::new(text).size(22.0).strong().color(color));
        }
    }

    fn results_view(summary: &Summary, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.label(egui::RichText::new("Great Job!").size(36.0).strong());
        ui.add_space(10.0);
        ui.label(egui::RichText::new(summary.message()).size(22.0));
        ui.add_space(20.0);
        let again = ui.add(
            egui::Button::new(egui::RichText::new("Play Again").strong()).min_size([200.0, 40.0].into()),
        );
        if again.clicked() {
            actions.push(Action::PlayAgain);
        }
    }
}

impl eframe::App for MathSmashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_timers(ctx);

        let mut actions = self.keyboard_actions(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                match self.quiz.screen() {
                    Screen::Settings => self.settings_view(ui, &mut actions),
                    Screen::Playing(round) => Self::playing_view(round, ui, &mut actions),
                    Screen::Results(summary) => Self::results_view(summary, ui, &mut actions),
                }

                if let Some(notice) = &self.notice {
                    ui.add_space(15.0);
                    ui.colored_label(WRONG_COLOR, notice.as_str());
                }
            });
        });

        if !actions.is_empty() {
            for action in actions {
                self.dispatch(action);
            }
            self.wake_for_next_timer(ctx);
            ctx.request_repaint();
        }
    }
}
