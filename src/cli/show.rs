use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::page::PageView;
use crate::session::Session;

#[derive(Serialize)]
struct ShowReport {
    route: String,
    redirected: bool,
    view: PageView,
}

pub fn run(mut session: Session, path: &str, options: OutputOptions) -> Result<()> {
    let resolution = session.navigate(path);
    let view = session.view();

    let mut human = HumanOutput::new(resolution.route.path());
    human.extend_lines(view.lines());
    if resolution.redirected {
        human.push_warning(format!("no page at '{path}', showing /"));
    }
    if matches!(view, PageView::NotFound { .. }) {
        human.push_next_step("ticklist show /");
    }

    let report = ShowReport {
        route: resolution.route.path(),
        redirected: resolution.redirected,
        view,
    };
    emit_success(options, "show", &report, Some(&human))
}
