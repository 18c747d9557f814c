//! Terminal rendition of the to-do page.
//!
//! The coordinator draws into [`TerminalPage`]; once the action has run the
//! page is written out in one go.

use colored::Colorize;
use std::io::{self, Write};
use todo_list::{CounterTarget, ListTarget, ListView, Page, TaskRow};

/// The list area. Holds the last view it was asked to show.
#[derive(Debug, Default)]
pub struct TerminalList {
    view: Option<ListView>,
}

impl ListTarget for TerminalList {
    fn replace(&mut self, view: &ListView) {
        self.view = Some(view.clone());
    }
}

impl TerminalList {
    pub fn view(&self) -> Option<&ListView> {
        self.view.as_ref()
    }

    pub fn lines(&self, styled: bool) -> Vec<String> {
        match &self.view {
            None => Vec::new(),
            Some(ListView::Empty { placeholder }) => vec![placeholder.to_string()],
            Some(ListView::Rows(rows)) => {
                rows.iter().map(|row| format_row(row, styled)).collect()
            }
        }
    }
}

/// The pending badge.
#[derive(Debug, Default)]
pub struct TerminalCounter {
    pending: Option<usize>,
}

impl CounterTarget for TerminalCounter {
    fn set_count(&mut self, pending: usize) {
        self.pending = Some(pending);
    }
}

impl TerminalCounter {
    pub fn pending(&self) -> Option<usize> {
        self.pending
    }
}

#[derive(Debug, Default)]
pub struct TerminalPage {
    list: TerminalList,
    counter: Option<TerminalCounter>,
    alerts: Vec<String>,
}

impl TerminalPage {
    /// A page with a list area, and a pending badge when `with_counter` is set.
    pub fn new(with_counter: bool) -> Self {
        Self {
            counter: with_counter.then(TerminalCounter::default),
            ..Default::default()
        }
    }

    pub fn list(&self) -> &TerminalList {
        &self.list
    }

    pub fn counter(&self) -> Option<&TerminalCounter> {
        self.counter.as_ref()
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Writes the list and the pending badge, if they were drawn.
    pub fn write_to(&self, out: &mut impl Write, styled: bool) -> io::Result<()> {
        for line in self.list.lines(styled) {
            writeln!(out, "{line}")?;
        }
        if let Some(pending) = self.counter.as_ref().and_then(TerminalCounter::pending) {
            writeln!(out, "Pending: {pending}")?;
        }
        Ok(())
    }

    pub fn write_alerts(&self, out: &mut impl Write) -> io::Result<()> {
        for alert in &self.alerts {
            writeln!(out, "{alert}")?;
        }
        Ok(())
    }
}

impl Page for TerminalPage {
    fn task_list(&mut self) -> Option<&mut dyn ListTarget> {
        Some(&mut self.list)
    }

    fn pending_counter(&mut self) -> Option<&mut dyn CounterTarget> {
        self.counter
            .as_mut()
            .map(|counter| counter as &mut dyn CounterTarget)
    }

    /// The text arrives as a command argument; there is no input line to empty.
    fn clear_input(&mut self) {}

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

fn format_row(row: &TaskRow, styled: bool) -> String {
    let checkbox = if row.completed { "[x]" } else { "[ ]" };
    let text = if styled && row.is_struck_through() {
        row.text.strikethrough().dimmed().to_string()
    } else {
        row.text.clone()
    };
    format!("{checkbox} {}  {text}", row.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, text: &str, completed: bool) -> TaskRow {
        TaskRow {
            id,
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn rows_are_written_with_checkbox_and_id() {
        let mut page = TerminalPage::new(true);
        page.list.replace(&ListView::Rows(vec![
            row(1, "Buy milk", true),
            row(2, "Walk dog", false),
        ]));
        page.pending_counter().unwrap().set_count(1);

        let mut out = Vec::new();
        page.write_to(&mut out, false).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[x] 1  Buy milk\n[ ] 2  Walk dog\nPending: 1\n"
        );
    }

    #[test]
    fn placeholder_is_written_for_empty_list() {
        let mut page = TerminalPage::new(true);
        page.list.replace(&ListView::Empty {
            placeholder: "No tasks found",
        });
        page.pending_counter().unwrap().set_count(0);

        let mut out = Vec::new();
        page.write_to(&mut out, false).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "No tasks found\nPending: 0\n");
    }

    #[test]
    fn page_without_counter_has_no_badge() {
        let mut page = TerminalPage::new(false);
        assert!(page.pending_counter().is_none());
        page.list.replace(&ListView::Rows(vec![row(1, "Buy milk", false)]));

        let mut out = Vec::new();
        page.write_to(&mut out, false).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "[ ] 1  Buy milk\n");
    }

    #[test]
    fn undrawn_page_writes_nothing() {
        let page = TerminalPage::new(true);

        let mut out = Vec::new();
        page.write_to(&mut out, false).unwrap();

        assert!(out.is_empty());
    }

    #[test]
    fn completed_rows_are_struck_through_when_styled() {
        colored::control::set_override(true);

        let line = format_row(&row(1, "Buy milk", true), true);

        assert!(line.starts_with("[x] 1  \u{1b}["));
        assert!(line.contains("Buy milk"));
        assert_ne!(line, format_row(&row(1, "Buy milk", true), false));
    }

    #[test]
    fn clear_input_keeps_drawn_content() {
        let mut page = TerminalPage::new(true);
        page.list.replace(&ListView::Rows(vec![row(1, "Buy milk", false)]));
        page.pending_counter().unwrap().set_count(1);

        page.clear_input();

        let mut out = Vec::new();
        page.write_to(&mut out, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[ ] 1  Buy milk\nPending: 1\n");
    }

    #[test]
    fn alerts_are_written_in_order() {
        let mut page = TerminalPage::new(true);

        page.alert("Please enter a task.");
        page.alert("Second");

        assert_eq!(
            page.alerts(),
            ["Please enter a task.".to_string(), "Second".to_string()]
        );
        let mut err = Vec::new();
        page.write_alerts(&mut err).unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "Please enter a task.\nSecond\n");
    }
}
