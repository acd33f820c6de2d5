use spendwise::aggregate::{category_totals, grand_total};
use spendwise::anomaly::{check_last, concentration_alerts, AnomalyOutcome};
use spendwise::insights::{overall_insight, recommendations, Severity};
use spendwise::qa::{answer, Question};
use spendwise::session::{ChatRole, Session};
use spendwise::store::ExpenseError;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Expenses,
    Summary,
    QuickQa,
    Chat,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Expenses => Page::Summary,
            Page::Summary => Page::QuickQa,
            Page::QuickQa => Page::Chat,
            Page::Chat => Page::Expenses,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Expenses => Page::Chat,
            Page::Summary => Page::Expenses,
            Page::QuickQa => Page::Summary,
            Page::Chat => Page::QuickQa,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Expenses => "Expenses",
            Page::Summary => "Summary & Insights",
            Page::QuickQa => "Quick Q&A",
            Page::Chat => "Chat",
        }
    }
}

/// Which field of the add-expense form holds the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Amount,
}

/// Input focus: browsing the table, typing into the form, or typing a chat
/// message. Typed characters only reach a buffer in the latter two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    EditingForm(FormField),
    EditingChat,
}

/// One-line feedback shown in the status bar after the last action.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

pub struct App {
    pub session: Session,
    pub current_page: Page,
    pub input_mode: InputMode,
    pub table_state: TableState,
    pub qa_state: ListState,
    pub description_input: String,
    pub amount_input: String,
    pub chat_input: String,
    pub qa_answer: Option<String>,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let mut table_state = TableState::default();
        if !session.store.is_empty() {
            table_state.select(Some(0));
        }

        let mut qa_state = ListState::default();
        qa_state.select(Some(0));

        Self {
            session,
            current_page: Page::Expenses,
            input_mode: InputMode::Browse,
            table_state,
            qa_state,
            description_input: String::new(),
            amount_input: String::new(),
            chat_input: String::new(),
            qa_answer: None,
            status: None,
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
        self.input_mode = InputMode::Browse;
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
        self.input_mode = InputMode::Browse;
    }

    /// Submit the form: validate, categorize, append, report the category.
    pub fn submit_expense(&mut self) {
        let amount = match self.amount_input.trim().parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                self.set_status(
                    "Please enter a valid description and amount.".to_string(),
                    Severity::Warning,
                );
                return;
            }
        };

        match self.session.store.add(&self.description_input, amount) {
            Ok(category) => {
                self.set_status(format!("Saved! Category: {}", category), Severity::Success);
                self.description_input.clear();
                self.amount_input.clear();
                self.input_mode = InputMode::Browse;
                // Select the newly added row.
                self.table_state
                    .select(Some(self.session.store.len() - 1));
            }
            Err(err) => self.set_status(err.to_string(), Severity::Warning),
        }
    }

    /// Delete the selected row. The position is re-derived from the table
    /// state at the moment of the keypress, never cached across renders.
    pub fn delete_selected(&mut self) {
        let Some(position) = self.table_state.selected() else {
            return;
        };

        match self.session.store.delete(position) {
            Ok(removed) => {
                self.set_status(
                    format!("Deleted \"{}\" (₹{:.2})", removed.description, removed.amount),
                    Severity::Info,
                );
                let len = self.session.store.len();
                if len == 0 {
                    self.table_state.select(None);
                } else if position >= len {
                    self.table_state.select(Some(len - 1));
                }
            }
            Err(err @ ExpenseError::PositionOutOfRange { .. }) => {
                // Stale selection; degrade to an informational message.
                self.set_status(err.to_string(), Severity::Info);
            }
            Err(err) => self.set_status(err.to_string(), Severity::Warning),
        }
    }

    pub fn ask_selected_question(&mut self) {
        let Some(index) = self.qa_state.selected() else {
            return;
        };
        if let Some(question) = Question::all().get(index) {
            self.qa_answer = Some(answer(*question, self.session.store.all()));
        }
    }

    pub fn submit_chat(&mut self) {
        let text = self.chat_input.clone();
        self.session.chat(&text);
        self.chat_input.clear();
    }

    pub fn set_status(&mut self, text: String, severity: Severity) {
        self.status = Some(StatusMessage { text, severity });
    }

    pub fn next_row(&mut self) {
        let len = self.session.store.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.session.store.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn next_question(&mut self) {
        let len = Question::all().len();
        let i = match self.qa_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.qa_state.select(Some(i));
    }

    pub fn previous_question(&mut self) {
        let len = Question::all().len();
        let i = match self.qa_state.selected() {
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.qa_state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Text-entry modes swallow printable keys first.
            match app.input_mode {
                InputMode::EditingForm(field) => {
                    match key.code {
                        KeyCode::Esc => {
                            app.input_mode = InputMode::Browse;
                        }
                        KeyCode::Tab => {
                            app.input_mode = InputMode::EditingForm(match field {
                                FormField::Description => FormField::Amount,
                                FormField::Amount => FormField::Description,
                            });
                        }
                        KeyCode::Enter => match field {
                            FormField::Description => {
                                app.input_mode = InputMode::EditingForm(FormField::Amount);
                            }
                            FormField::Amount => app.submit_expense(),
                        },
                        KeyCode::Backspace => {
                            match field {
                                FormField::Description => app.description_input.pop(),
                                FormField::Amount => app.amount_input.pop(),
                            };
                        }
                        KeyCode::Char(c) => match field {
                            FormField::Description => app.description_input.push(c),
                            FormField::Amount => app.amount_input.push(c),
                        },
                        _ => {}
                    }
                    continue;
                }
                InputMode::EditingChat => {
                    match key.code {
                        KeyCode::Esc => app.input_mode = InputMode::Browse,
                        KeyCode::Enter => app.submit_chat(),
                        KeyCode::Backspace => {
                            app.chat_input.pop();
                        }
                        KeyCode::Char(c) => app.chat_input.push(c),
                        _ => {}
                    }
                    continue;
                }
                InputMode::Browse => {}
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::Char('a') if app.current_page == Page::Expenses => {
                    app.input_mode = InputMode::EditingForm(FormField::Description);
                }
                KeyCode::Char('d') if app.current_page == Page::Expenses => {
                    app.delete_selected();
                }
                KeyCode::Char('i') if app.current_page == Page::Chat => {
                    app.input_mode = InputMode::EditingChat;
                }
                KeyCode::Enter if app.current_page == Page::QuickQa => {
                    app.ask_selected_question();
                }
                KeyCode::Down | KeyCode::Char('j') => match app.current_page {
                    Page::QuickQa => app.next_question(),
                    _ => app.next_row(),
                },
                KeyCode::Up | KeyCode::Char('k') => match app.current_page {
                    Page::QuickQa => app.previous_question(),
                    _ => app.previous_row(),
                },
                KeyCode::Home => app.table_state.select(Some(0)),
                KeyCode::End => {
                    if !app.session.store.is_empty() {
                        app.table_state.select(Some(app.session.store.len() - 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Expenses => render_expenses(f, chunks[1], app),
        Page::Summary => render_summary(f, chunks[1], app),
        Page::QuickQa => render_qa(f, chunks[1], app),
        Page::Chat => render_chat(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Expenses, Page::Summary, Page::QuickQa, Page::Chat];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Records: {}", app.session.store.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Total: ₹{:.2}", grand_total(app.session.store.all())),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Spendwise 💰 "),
    );

    f.render_widget(header, area);
}

fn render_expenses(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Input form
            Constraint::Min(0),    // Expense table
        ])
        .split(area);

    render_input_form(f, chunks[0], app);
    render_expense_table(f, chunks[1], app);
}

fn render_input_form(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let focused = |field: FormField| app.input_mode == InputMode::EditingForm(field);

    let field_style = |active: bool| {
        if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let description = Paragraph::new(app.description_input.as_str())
        .style(field_style(focused(FormField::Description)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(field_style(focused(FormField::Description)))
                .title(" Enter expense description "),
        );
    f.render_widget(description, columns[0]);

    let amount = Paragraph::new(app.amount_input.as_str())
        .style(field_style(focused(FormField::Amount)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(field_style(focused(FormField::Amount)))
                .title(" Amount (₹) "),
        );
    f.render_widget(amount, columns[1]);
}

fn render_expense_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["#", "Description", "Amount", "Category"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app
        .session
        .store
        .all()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let cells = vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(truncate(&record.description, 40)),
                Cell::from(format!("₹{:.2}", record.amount))
                    .style(Style::default().fg(Color::Red)),
                Cell::from(record.category.as_str()),
            ];
            Row::new(cells).height(1)
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(42),
            Constraint::Length(14),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Saved Expenses 📊 "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_category_totals(f, columns[0], app);
    render_insights(f, columns[1], app);
}

fn render_category_totals(f: &mut Frame, area: Rect, app: &App) {
    let records = app.session.store.all();
    let totals = category_totals(records);
    let total = grand_total(records);

    let header_cells = ["Category", "Spent", "Share"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = totals.iter().map(|(category, sum)| {
        let share = if total > 0.0 { sum / total * 100.0 } else { 0.0 };
        let cells = vec![
            Cell::from(category.as_str()),
            Cell::from(format!("₹{:.2}", sum)),
            Cell::from(format!("{:.1}%", share)),
        ];
        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Category-wise Spending "),
    );

    f.render_widget(table, area);
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
        Severity::Success => Color::Green,
    }
}

fn render_insights(f: &mut Frame, area: Rect, app: &App) {
    let records = app.session.store.all();
    let mut lines: Vec<Line> = Vec::new();

    if records.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Start adding expenses to get insights and predictions.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  AI Insights 🧠",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for advice in overall_insight(records) {
            lines.push(Line::from(Span::styled(
                format!("  • {}", advice.text),
                Style::default().fg(severity_color(advice.severity)),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Smart Alerts ⚠️",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        match check_last(records) {
            AnomalyOutcome::Unusual { amount, .. } => {
                lines.push(Line::from(Span::styled(
                    format!("  • ⚠️ Unusual Expense Detected: ₹{:.2}", amount),
                    Style::default().fg(Color::Red),
                )));
            }
            outcome => {
                lines.push(Line::from(Span::styled(
                    format!("  • {}", outcome.message()),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        for alert in concentration_alerts(records) {
            lines.push(Line::from(Span::styled(
                format!("  • {}", alert.message()),
                Style::default().fg(Color::Yellow),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Next Month Smart Recommendations 🔮",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for advice in recommendations(records) {
            lines.push(Line::from(Span::styled(
                format!("  • {}", advice.text),
                Style::default().fg(severity_color(advice.severity)),
            )));
        }
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Insights & Alerts "),
    );

    f.render_widget(panel, area);
}

fn render_qa(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let items: Vec<ListItem> = Question::all()
        .iter()
        .map(|q| ListItem::new(q.prompt()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Select a question 📚 "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, chunks[0], &mut app.qa_state);

    let answer_text = app
        .qa_answer
        .as_deref()
        .unwrap_or("Press Enter to ask the selected question.");

    let answer_panel = Paragraph::new(answer_text)
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Answer "),
        );

    f.render_widget(answer_panel, chunks[1]);
}

fn render_chat(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let lines: Vec<Line> = app
        .session
        .messages
        .iter()
        .map(|message| {
            let (label, color) = match message.role {
                ChatRole::User => ("You", Color::Green),
                ChatRole::Bot => ("Bot", Color::Cyan),
            };
            Line::from(vec![
                Span::styled(
                    format!("  {}: ", label),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(message.content.clone()),
            ])
        })
        .collect();

    let transcript = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Chat 💬 "),
    );
    f.render_widget(transcript, chunks[0]);

    let input_style = if app.input_mode == InputMode::EditingChat {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = Paragraph::new(app.chat_input.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(input_style)
                .title(" Message (i to type, Enter to send) "),
        );
    f.render_widget(input, chunks[1]);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if let Some(status) = &app.status {
        status_spans.push(Span::styled(
            format!(" {} ", status.text),
            Style::default().fg(severity_color(status.severity)),
        ));
        status_spans.push(Span::raw("| "));
    }

    match app.input_mode {
        InputMode::EditingForm(_) => {
            status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Switch field | "));
            status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Save | "));
            status_spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Cancel"));
        }
        InputMode::EditingChat => {
            status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Send | "));
            status_spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Done"));
        }
        InputMode::Browse => {
            status_spans.push(Span::styled("a", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Add | "));
            status_spans.push(Span::styled("d", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Delete | "));
            status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Page | "));
            status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Nav | "));
            status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
            status_spans.push(Span::raw(" Quit"));
        }
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
