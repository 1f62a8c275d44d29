//! Interactive menu
//!
//! Numbered-menu loop over any reader/writer pair, so it can be driven by
//! stdin/stdout or by a test.

use std::io::{BufRead, Write};

use tracing::error;

use crate::error::Result;
use crate::store::TableStore;

use super::parse::{parse_assignments, parse_columns, typed_criteria, typed_record};

const MENU: &str = "\nflatstore\n\
1. Create Table\n\
2. Insert Record\n\
3. Query Records\n\
4. Delete Records\n\
5. Exit\n";

/// Menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateTable,
    Insert,
    Query,
    Delete,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::CreateTable),
            "2" => Some(MenuChoice::Insert),
            "3" => Some(MenuChoice::Query),
            "4" => Some(MenuChoice::Delete),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Interactive shell bound to a store
pub struct Shell<'a, R, W> {
    store: &'a TableStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a TableStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends
    ///
    /// Store errors are printed and the loop continues. Only failures to
    /// read input or write output are returned.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.output.write_all(MENU.as_bytes())?;
            let Some(choice) = self.prompt("\nChoose an option (1-5): ")? else {
                return Ok(());
            };

            let step = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                Some(choice) => self.dispatch(choice),
                None => {
                    writeln!(self.output, "Invalid choice. Please choose a valid option.")?;
                    continue;
                }
            };

            match step {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(e) => {
                    error!("{}", e);
                    writeln!(self.output, "Error: {}", e)?;
                }
            }
        }
    }

    /// Run one menu action. `Ok(false)` means input ended mid-action.
    fn dispatch(&mut self, choice: MenuChoice) -> Result<bool> {
        let Some(table) = self.prompt("Enter table name: ")? else {
            return Ok(false);
        };
        let table = table.trim().to_string();

        match choice {
            MenuChoice::CreateTable => {
                let Some(line) = self.prompt("Enter columns (format: name:type,name:type,...): ")?
                else {
                    return Ok(false);
                };
                let columns = parse_columns(&line)?;
                self.store.create_table(&table, &columns)?;
                writeln!(self.output, "Table '{}' created successfully!", table)?;
            }
            MenuChoice::Insert => {
                let Some(line) = self.prompt("Enter record (format: name=value,name=value,...): ")?
                else {
                    return Ok(false);
                };
                let pairs = parse_assignments(&line)?;
                let schema = self.store.schema(&table)?;
                self.store.insert(&table, &typed_record(&schema, &pairs))?;
                writeln!(self.output, "Record inserted into '{}' successfully!", table)?;
            }
            MenuChoice::Query => {
                let Some(line) = self.prompt(
                    "Enter query criteria (format: name=value,... or leave blank for all records): ",
                )?
                else {
                    return Ok(false);
                };
                let pairs = parse_assignments(&line)?;
                let schema = self.store.schema(&table)?;
                let criteria = typed_criteria(&schema, &pairs);
                let records = self.store.query(&table, Some(&criteria))?;
                writeln!(self.output, "\nQueried Records:")?;
                for record in &records {
                    writeln!(self.output, "{}", record)?;
                }
            }
            MenuChoice::Delete => {
                let Some(line) = self.prompt("Enter delete criteria (format: name=value,...): ")?
                else {
                    return Ok(false);
                };
                let pairs = parse_assignments(&line)?;
                let schema = self.store.schema(&table)?;
                let removed = self
                    .store
                    .delete(&table, &typed_criteria(&schema, &pairs))?;
                writeln!(
                    self.output,
                    "{} record(s) deleted from '{}'.",
                    removed, table
                )?;
            }
            MenuChoice::Exit => {}
        }

        Ok(true)
    }

    /// Print a prompt and read one line; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
