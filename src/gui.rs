//! The Hero Chess window, built with Iced.
//!
//! This file follows the Elm architecture, a Model-View-Update pattern:
//! - `HeroChessApp` is the Model: It holds the game session and layout config.
//! - `Message` is the Update trigger: It defines all possible UI events.
//! - `update` is the Update logic: It forwards events to the session and
//!   schedules the delayed opponent reply when asked to.
//! - `view` is the View: It renders the board, trays and panels from the
//!   current session state.

use std::time::Duration;

use iced::{
    executor,
    widget::{container, text, Button, Column, Container, MouseArea, Row, Space},
    Application, Background, Border, Color, Command, Element, Length, Pixels, Settings, Size,
    Subscription, Theme,
};

use rules::types::{Kind, Side, Square};

use crate::board::{Marker, SquareCell};
use crate::config::UiConfig;
use crate::session::{Effect, Session, SessionState};
use crate::status::{self, Tone};
use crate::theme;

/// Runs the GUI application.
pub fn run() -> iced::Result {
    HeroChessApp::run(Settings {
        window: iced::window::Settings {
            size: Size::new(700.0, 900.0),
            ..iced::window::Settings::default()
        },
        ..Settings::default()
    })
}

/// Defines the messages that can be sent to the `update` function.
#[derive(Debug, Clone)]
enum Message {
    NewGame,
    SquareClicked(Square),
    PromotionChosen(Kind),
    OpponentReply(u64),
}

/// The main application state (the "Model").
struct HeroChessApp {
    session: Session,
    config: UiConfig,
}

// --- Application Logic ---

impl Application for HeroChessApp {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let app = HeroChessApp {
            session: Session::new(),
            config: UiConfig::default(),
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Hero Chess")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        let effect = match message {
            Message::NewGame => self.session.new_game(),
            Message::SquareClicked(square) => self.session.click(square),
            Message::PromotionChosen(kind) => self.session.choose_promotion(kind),
            Message::OpponentReply(generation) => self.session.opponent_reply(generation),
        };
        self.run_effect(effect)
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::none()
    }

    fn view(&'_ self) -> Element<'_, Message> {
        let status = status::derive(self.session.game());
        let status_line = text(status.text)
            .size(Pixels(24.0))
            .style(iced::theme::Text::Color(tone_color(status.tone)));

        let mut content = Column::new()
            .spacing(16)
            .align_items(iced::Alignment::Center)
            .push(status_line);

        if matches!(self.session.state(), SessionState::AwaitingPromotion { .. }) {
            content = content.push(self.promotion_panel());
        }

        let controls = Row::new()
            .spacing(10)
            .push(Button::new(text("New Game")).on_press(Message::NewGame));

        content = content
            .push(self.board_grid())
            .push(self.tray("Lost:", Side::Light))
            .push(self.tray("Won:", Side::Dark))
            .push(controls);

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .into()
    }
}

// --- Update Helper Functions ---

impl HeroChessApp {
    /// Turns a session effect into the command the runtime executes.
    fn run_effect(&self, effect: Effect) -> Command<Message> {
        match effect {
            Effect::None => Command::none(),
            Effect::ScheduleReply(generation) => {
                let delay = Duration::from_millis(self.config.reply_delay_ms);
                Command::perform(
                    async move {
                        tokio::time::sleep(delay).await;
                        generation
                    },
                    Message::OpponentReply,
                )
            }
        }
    }
}

// --- View Helper Functions ---

impl HeroChessApp {
    fn board_grid(&self) -> Element<'_, Message> {
        let mut rows = Column::new();
        let mut rank_row = Row::new();
        for (square, cell) in self.session.board().iter() {
            rank_row = rank_row.push(self.square_widget(*square, cell));
            if square.file() == 7 {
                rows = rows.push(rank_row);
                rank_row = Row::new();
            }
        }
        rows.into()
    }

    /// One clickable board square: coordinate labels in the corners, the
    /// piece portrait in the middle, all over the marker-derived fill.
    fn square_widget(&self, square: Square, cell: &SquareCell) -> Element<'_, Message> {
        let size = self.config.square_size;
        let label_color = if cell.is_light {
            Color::from_rgb8(0xb5, 0x88, 0x63)
        } else {
            Color::from_rgb8(0xf0, 0xd9, 0xb5)
        };
        let corner = |label: Option<char>| {
            text(label.map(String::from).unwrap_or_default())
                .size(Pixels(10.0))
                .style(iced::theme::Text::Color(label_color))
        };

        let body: Element<'_, Message> = match self
            .session
            .game()
            .piece_at(square)
            .and_then(|piece| theme::board_piece(piece, self.config.piece_size))
        {
            Some(portrait) => portrait,
            None => Space::new(Length::Shrink, Length::Shrink).into(),
        };

        let stack = Column::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(Row::new().width(Length::Fill).push(corner(cell.rank_label)))
            .push(
                Container::new(body)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .center_x()
                    .center_y(),
            )
            .push(
                Row::new()
                    .width(Length::Fill)
                    .push(Space::with_width(Length::Fill))
                    .push(corner(cell.file_label)),
            );

        MouseArea::new(
            Container::new(stack)
                .width(Length::Fixed(size))
                .height(Length::Fixed(size))
                .style(square_style(cell)),
        )
        .on_press(Message::SquareClicked(square))
        .into()
    }

    /// Shown only while a promotion choice is pending. Clicking a portrait
    /// resolves the pending move; clicking the board dismisses it instead.
    fn promotion_panel(&self) -> Element<'_, Message> {
        let mut options = Row::new().spacing(12);
        for kind in Kind::PROMOTABLE {
            if let Some(choice) = theme::promo_choice(kind, Side::Light, self.config.promo_piece_size)
            {
                options =
                    options.push(MouseArea::new(choice).on_press(Message::PromotionChosen(kind)));
            }
        }
        Container::new(
            Column::new()
                .spacing(8)
                .align_items(iced::Alignment::Center)
                .push(text("Promote to:").size(Pixels(16.0)))
                .push(options),
        )
        .padding(12)
        .style(iced::theme::Container::Custom(Box::new(PanelStyle)))
        .into()
    }

    fn tray(&self, label: &'static str, side: Side) -> Element<'_, Message> {
        let mut row = Row::new()
            .spacing(6)
            .align_items(iced::Alignment::Center)
            .push(text(label).size(Pixels(14.0)));
        for piece in self.session.lost_pieces(side) {
            if let Some(mini) = theme::captured_piece(*piece, self.config.tray_piece_size) {
                row = row.push(mini);
            }
        }
        Container::new(row)
            .width(Length::Fixed(self.config.square_size * 8.0))
            .padding(4)
            .into()
    }
}

// --- Colors and Styling ---

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Normal => Color::from_rgb8(0x26, 0x32, 0x38),
        Tone::Check => Color::from_rgb8(0xd3, 0x2f, 0x2f),
        Tone::GameOver => Color::from_rgb8(0x2e, 0x7d, 0x32),
    }
}

/// Blends `tint` into `base`, keeping the alpha of `base`.
fn mix(base: Color, tint: Color, amount: f32) -> Color {
    Color {
        r: base.r + (tint.r - base.r) * amount,
        g: base.g + (tint.g - base.g) * amount,
        b: base.b + (tint.b - base.b) * amount,
        a: base.a,
    }
}

fn square_style(cell: &SquareCell) -> iced::theme::Container {
    let base = if cell.is_light {
        Color::from_rgb8(0xf0, 0xd9, 0xb5)
    } else {
        Color::from_rgb8(0xb5, 0x88, 0x63)
    };

    let mut fill = base;
    if cell.has(Marker::LastMove) {
        fill = mix(fill, Color::from_rgb8(0xff, 0xeb, 0x3b), 0.45);
    }
    if cell.has(Marker::ReachableQuiet) {
        fill = mix(fill, Color::from_rgb8(0x4c, 0xaf, 0x50), 0.35);
    }
    if cell.has(Marker::ReachableCapture) {
        fill = mix(fill, Color::from_rgb8(0xef, 0x53, 0x50), 0.35);
    }

    let border = if cell.has(Marker::Selected) {
        Some((Color::from_rgb8(0x2e, 0x7d, 0x32), 3.0))
    } else if cell.has(Marker::ReachableCapture) {
        Some((Color::from_rgb8(0xc6, 0x28, 0x28), 2.0))
    } else {
        None
    };

    iced::theme::Container::Custom(Box::new(SquareStyle { fill, border }))
}

struct SquareStyle {
    fill: Color,
    border: Option<(Color, f32)>,
}

impl container::StyleSheet for SquareStyle {
    type Style = Theme;

    fn appearance(&self, _theme: &Theme) -> container::Appearance {
        let (color, width) = self.border.unwrap_or((Color::TRANSPARENT, 0.0));
        container::Appearance {
            background: Some(Background::Color(self.fill)),
            border: Border { color, width, radius: 0.0.into() },
            ..container::Appearance::default()
        }
    }
}

struct PanelStyle;

impl container::StyleSheet for PanelStyle {
    type Style = Theme;

    fn appearance(&self, _theme: &Theme) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color::from_rgb8(0xfa, 0xfa, 0xfa))),
            border: Border {
                color: Color::from_rgb8(0x90, 0xa4, 0xae),
                width: 1.0,
                radius: 8.0.into(),
            },
            ..container::Appearance::default()
        }
    }
}
