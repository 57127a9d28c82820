use crate::app::{App, FormField, ScreenState};
use crate::theme::Theme;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use quizdle_core::{Conflict, Direction, Grid, Position};
use std::io;

/// Grid origin shared by the review and editor screens; the mouse hit
/// testing below inverts exactly this layout.
pub const GRID_X: u16 = 2;
pub const GRID_Y: u16 = 2;
/// Cell footprint including one border line/column.
const CELL_W: u16 = 4;
const CELL_H: u16 = 2;

/// Whether a terminal coordinate lands anywhere on the drawn grid,
/// borders included.
pub fn editor_grid_contains(x: u16, y: u16, n: usize) -> bool {
    let w = CELL_W * n as u16 + 1;
    let h = CELL_H * n as u16 + 1;
    x >= GRID_X && x < GRID_X + w && y >= GRID_Y && y < GRID_Y + h
}

/// The cell under a terminal coordinate, if it hits a cell interior.
pub fn editor_grid_hit(x: u16, y: u16, n: usize) -> Option<Position> {
    if !editor_grid_contains(x, y, n) {
        return None;
    }
    let dx = x - GRID_X;
    let dy = y - GRID_Y;
    if dx % CELL_W == 0 || dy % CELL_H == 0 {
        // Border line, not a cell
        return None;
    }
    Some(Position::new((dy / CELL_H) as usize, (dx / CELL_W) as usize))
}

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    execute!(stdout, Hide, Clear(ClearType::All))?;
    execute!(stdout, SetBackgroundColor(app.theme.bg))?;

    match app.screen_state {
        ScreenState::Answers => render_answers_screen(stdout, app)?,
        ScreenState::Review => render_review_screen(stdout, app)?,
        ScreenState::Editor => render_editor_screen(stdout, app)?,
        ScreenState::Schedule => render_schedule_screen(stdout, app)?,
        ScreenState::Publish => render_publish_screen(stdout, app)?,
    }

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_title(stdout: &mut io::Stdout, theme: &Theme, text: &str) -> io::Result<()> {
    execute!(
        stdout,
        MoveTo(2, 0),
        SetForegroundColor(theme.key),
        Print(text)
    )
}

fn render_controls(stdout: &mut io::Stdout, theme: &Theme, y: u16, text: &str) -> io::Result<()> {
    execute!(
        stdout,
        MoveTo(2, y),
        SetForegroundColor(theme.info),
        Print(text)
    )
}

fn render_message(stdout: &mut io::Stdout, app: &App, msg: &str) -> io::Result<()> {
    let (_, term_height) = terminal::size()?;
    execute!(
        stdout,
        MoveTo(2, term_height.saturating_sub(2)),
        SetForegroundColor(app.theme.key),
        Print(msg)
    )
}

// ==================== Answers form ====================

fn render_answers_screen(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    render_title(stdout, theme, "QUIZDLE BUILDER")?;

    let draft = app.builder.draft();
    for row in 0..draft.questions.len() {
        let y = 2 + row as u16 * 2;

        render_form_field(
            stdout,
            theme,
            2,
            y,
            &format!("Q{}:", row + 1),
            &draft.questions[row],
            40,
            app.form_row == row && app.form_field == FormField::Question,
            false,
        )?;
        render_form_field(
            stdout,
            theme,
            50,
            y,
            &format!("A{}:", row + 1),
            &draft.answers[row],
            20,
            app.form_row == row && app.form_field == FormField::Answer,
            app.is_flashing(row),
        )?;
    }

    render_controls(
        stdout,
        theme,
        13,
        "[Ctrl+B] build grid  [Ctrl+L] clear all  [Tab] question/answer  [Enter] next  [Esc] grids",
    )
}

#[allow(clippy::too_many_arguments)]
fn render_form_field(
    stdout: &mut io::Stdout,
    theme: &Theme,
    x: u16,
    y: u16,
    label: &str,
    value: &str,
    width: usize,
    selected: bool,
    flashing: bool,
) -> io::Result<()> {
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.info),
        Print(label)
    )?;

    if flashing {
        execute!(stdout, SetBackgroundColor(theme.error))?;
    } else if selected {
        execute!(stdout, SetBackgroundColor(theme.selected_bg))?;
    }
    execute!(
        stdout,
        MoveTo(x + label.len() as u16 + 1, y),
        SetForegroundColor(theme.fg),
        Print(format!("{:<width$}", value, width = width))
    )?;
    execute!(stdout, SetBackgroundColor(theme.bg))
}

// ==================== Candidate review ====================

fn render_review_screen(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;

    let Some(projected) = app.builder.current_grid() else {
        render_title(stdout, theme, "QUIZDLE BUILDER")?;
        execute!(
            stdout,
            MoveTo(GRID_X, GRID_Y),
            SetForegroundColor(theme.info),
            Print("No grid yet - press [a] for answers")
        )?;
        return render_controls(stdout, theme, GRID_Y + 2, "[a]nswers  [q]uit");
    };

    if let Some((index, total)) = app.builder.candidate_position() {
        // Mirror the disabled prev/next buttons at the ends of the batch
        let edge = match (
            app.builder.is_first_candidate(),
            app.builder.is_last_candidate(),
        ) {
            (true, true) => " (only grid)",
            (true, false) => " (first)",
            (false, true) => " (last)",
            (false, false) => "",
        };
        render_title(
            stdout,
            theme,
            &format!("Grid {} of {}{}", index, total, edge),
        )?;
    }

    render_grid(stdout, theme, &projected.grid, None, &projected.conflicts)?;

    let below = GRID_Y + CELL_H * projected.grid.size() as u16 + 2;
    if !projected.conflicts.is_empty() {
        execute!(
            stdout,
            MoveTo(2, below),
            SetForegroundColor(theme.conflict),
            Print(format!(
                "{} conflicting cell(s) - the layout service disagreed with itself",
                projected.conflicts.len()
            ))
        )?;
    }

    render_controls(
        stdout,
        theme,
        below + 1,
        "[p]rev  [n]ext  [r]ebuild  [e]dit  [s]chedule  [a]nswers  [q]uit",
    )
}

// ==================== Manual editor ====================

fn render_editor_screen(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let Some(editor) = app.editor.as_ref() else {
        return Ok(());
    };

    let direction = match editor.direction() {
        Direction::Across => "ACROSS",
        Direction::Down => "DOWN",
    };
    render_title(stdout, theme, &format!("EDITOR - typing {}", direction))?;

    render_grid(stdout, theme, editor.grid(), editor.focus(), &[])?;

    // Live clue listing beside the grid
    let panel_x = GRID_X + CELL_W * editor.grid().size() as u16 + 4;
    execute!(
        stdout,
        MoveTo(panel_x, GRID_Y),
        SetForegroundColor(theme.info),
        Print("Words on the grid:")
    )?;
    for (i, occurrence) in editor.occurrences().iter().enumerate() {
        execute!(
            stdout,
            MoveTo(panel_x, GRID_Y + 1 + i as u16),
            SetForegroundColor(theme.fg),
            Print(format!(
                "{}  {}",
                occurrence.word,
                occurrence.position_code()
            ))
        )?;
    }

    let below = GRID_Y + CELL_H * editor.grid().size() as u16 + 2;
    render_controls(
        stdout,
        theme,
        below,
        "[click] focus  [click same cell] toggle direction  [arrows] move  [Esc] back",
    )
}

// ==================== Shared grid drawing ====================

fn render_grid(
    stdout: &mut io::Stdout,
    theme: &Theme,
    grid: &Grid,
    focus: Option<Position>,
    conflicts: &[Conflict],
) -> io::Result<()> {
    let n = grid.size();

    let mut border = String::new();
    for _ in 0..n {
        border.push_str("+---");
    }
    border.push('+');

    for row in 0..n {
        execute!(
            stdout,
            MoveTo(GRID_X, GRID_Y + row as u16 * CELL_H),
            SetForegroundColor(theme.border),
            Print(&border)
        )?;

        let cell_y = GRID_Y + row as u16 * CELL_H + 1;
        for col in 0..n {
            let pos = Position::new(row, col);
            execute!(
                stdout,
                MoveTo(GRID_X + col as u16 * CELL_W, cell_y),
                SetForegroundColor(theme.border),
                Print("|")
            )?;

            if focus == Some(pos) {
                execute!(stdout, SetBackgroundColor(theme.selected_bg))?;
            }
            let (ch, color) = match grid.get(pos) {
                Some(ch) if conflicts.iter().any(|c| c.pos == pos) => (ch, theme.conflict),
                Some(ch) => (ch, theme.letter),
                None => ('.', theme.empty),
            };
            execute!(
                stdout,
                SetForegroundColor(color),
                Print(format!(" {} ", ch))
            )?;
            if focus == Some(pos) {
                execute!(stdout, SetBackgroundColor(theme.bg))?;
            }
        }
        execute!(
            stdout,
            MoveTo(GRID_X + n as u16 * CELL_W, cell_y),
            SetForegroundColor(theme.border),
            Print("|")
        )?;
    }

    execute!(
        stdout,
        MoveTo(GRID_X, GRID_Y + n as u16 * CELL_H),
        SetForegroundColor(theme.border),
        Print(&border)
    )
}

// ==================== Schedule calendar ====================

fn render_schedule_screen(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    render_title(stdout, theme, "SCHEDULE - pick a publish day")?;

    for (i, day) in app.week.days().iter().enumerate() {
        let x = 2 + i as u16 * 10;
        let selected = i == app.day_selection;

        let label_color = if day.done { theme.success } else { theme.fg };
        if selected {
            execute!(stdout, SetBackgroundColor(theme.selected_bg))?;
        }
        execute!(
            stdout,
            MoveTo(x, 2),
            SetForegroundColor(theme.info),
            Print(format!("{:^7}", day.weekday_label())),
            MoveTo(x, 3),
            SetForegroundColor(label_color),
            Print(format!("{:^7}", day.day_label())),
            MoveTo(x, 4),
            SetForegroundColor(theme.info),
            Print(format!("{:^7}", day.month_label())),
            MoveTo(x, 5),
            SetForegroundColor(theme.success),
            Print(format!("{:^7}", if day.done { "done" } else { "" }))
        )?;
        if selected {
            execute!(stdout, SetBackgroundColor(theme.bg))?;
        }
    }

    render_controls(
        stdout,
        theme,
        8,
        "[left/right] pick day  [Enter] choose  [r]efresh  [Esc] back  [q]uit",
    )
}

// ==================== Publish ====================

fn render_publish_screen(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    render_title(stdout, theme, "PUBLISH")?;

    let date = app
        .builder
        .selected_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "?".to_string());

    execute!(
        stdout,
        MoveTo(2, 2),
        SetForegroundColor(theme.fg),
        Print(format!("Upload this quizdle for {}?", date)),
        MoveTo(2, 4),
        SetForegroundColor(theme.info),
        Print("This action requires a password."),
        MoveTo(2, 6),
        SetForegroundColor(theme.fg),
        Print(format!("Password: {}", "*".repeat(app.password.len())))
    )?;

    render_controls(stdout, theme, 9, "[Enter] upload  [Esc] back")
}
