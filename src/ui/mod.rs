pub mod blocks;
pub mod blog;
pub mod command_bar;
pub mod contact;
pub mod help;
pub mod home;
pub mod post;
pub mod status_bar;
pub mod work;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::app::{App, AppMode};
use crate::nav::Page;

use blog::BlogView;
use command_bar::CommandBar;
use contact::ContactView;
use help::HelpView;
use home::HomeView;
use post::PostView;
use status_bar::StatusBar;
use work::WorkView;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: page content + status bar + command bar while typing.
    let bottom_height = if app.mode == AppMode::Command { 2 } else { 1 };
    let [main_area, bottom_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(bottom_height)]).areas(area);

    if app.mode == AppMode::Command {
        let [status_area, cmd_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(bottom_area);
        frame.render_widget(StatusBar::new(app), status_area);
        frame.render_widget(CommandBar::new(app), cmd_area);
    } else {
        frame.render_widget(StatusBar::new(app), bottom_area);
    }

    match app.nav.page() {
        Page::Home => frame.render_widget(HomeView::new(app), main_area),
        Page::Work => frame.render_widget(WorkView::new(app), main_area),
        Page::Blog => frame.render_widget(BlogView::new(app), main_area),
        Page::BlogDetail => {
            // The navigator only reports this page with a post selected, but
            // fall back to the list rather than a blank panel.
            match app.nav.selected_post_id() {
                Some(post_id) => frame.render_widget(PostView::new(app, post_id), main_area),
                None => frame.render_widget(BlogView::new(app), main_area),
            }
        }
        Page::Contact => frame.render_widget(ContactView::new(app), main_area),
    }

    if app.show_help {
        frame.render_widget(HelpView::new(app.theme), main_area);
    }
}
