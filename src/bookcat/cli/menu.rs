//! The numbered interactive menu.
//!
//! Input and output are generic so the whole loop can be driven from a byte
//! buffer in tests. End of input behaves like choosing "Quit".

use super::render::{print_error, print_messages, print_records};
use bookcat::api::CatalogApi;
use bookcat::export::ExportSelector;
use bookcat::model::RecordFields;
use bookcat::render::Renderer;
use bookcat::store::StorageBackend;
use colored::Colorize;
use std::io::{self, BufRead, Write};

const MENU: &str = "\
1. Add record
2. List records
3. Delete record
4. Edit record
5. Export one record
6. Export all records
7. Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Delete,
    Edit,
    ExportOne,
    ExportAll,
    Quit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::List),
            "3" => Some(MenuChoice::Delete),
            "4" => Some(MenuChoice::Edit),
            "5" => Some(MenuChoice::ExportOne),
            "6" => Some(MenuChoice::ExportAll),
            "7" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// Line-oriented prompt over any reader/writer pair.
pub struct Console<I, O> {
    input: I,
    out: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, out: O) -> Self {
        Self { input, out }
    }

    /// Prints `label` and reads one trimmed line. `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn out(&mut self) -> &mut O {
        &mut self.out
    }

    fn prompt_fields(&mut self) -> io::Result<Option<RecordFields>> {
        let Some(title) = self.prompt("Title: ")? else {
            return Ok(None);
        };
        let Some(author) = self.prompt("Author: ")? else {
            return Ok(None);
        };
        let Some(publisher) = self.prompt("Publisher: ")? else {
            return Ok(None);
        };
        let Some(description) = self.prompt("Description: ")? else {
            return Ok(None);
        };
        Ok(Some(RecordFields::new(title, author, publisher, description)))
    }
}

/// Runs the menu until the user quits or input ends.
pub fn run<B, R, I, O>(api: &mut CatalogApi<B, R>, console: &mut Console<I, O>) -> io::Result<()>
where
    B: StorageBackend,
    R: Renderer + 'static,
    I: BufRead,
    O: Write,
{
    loop {
        writeln!(console.out(), "\n{}", "=== Book Catalog ===".bold())?;
        writeln!(console.out(), "{}", MENU)?;
        let Some(input) = console.prompt("Choose an option: ")? else {
            break;
        };

        let keep_going = match MenuChoice::parse(&input) {
            Some(MenuChoice::Add) => handle_add(api, console)?,
            Some(MenuChoice::List) => handle_list(api, console)?,
            Some(MenuChoice::Delete) => handle_delete(api, console)?,
            Some(MenuChoice::Edit) => handle_edit(api, console)?,
            Some(MenuChoice::ExportOne) => handle_export_one(api, console)?,
            Some(MenuChoice::ExportAll) => handle_export(api, console, &ExportSelector::All)?,
            Some(MenuChoice::Quit) => false,
            None => {
                writeln!(
                    console.out(),
                    "{}",
                    format!("Invalid choice: {}", input).red()
                )?;
                true
            }
        };

        if !keep_going {
            break;
        }
    }

    writeln!(console.out(), "Goodbye.")?;
    Ok(())
}

// Each handler returns Ok(false) when input ran out and the menu should stop.

fn handle_add<B, R, I, O>(api: &mut CatalogApi<B, R>, console: &mut Console<I, O>) -> io::Result<bool>
where
    B: StorageBackend,
    R: Renderer + 'static,
    I: BufRead,
    O: Write,
{
    loop {
        writeln!(console.out(), "{}", "=== Add Record ===".bold())?;
        let Some(fields) = console.prompt_fields()? else {
            return Ok(false);
        };

        match api.add_record(fields) {
            Ok(result) => print_messages(console.out(), &result.messages)?,
            Err(e) => print_error(console.out(), &e)?,
        }

        match console.prompt("Add another record? (y/n): ")? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => continue,
            Some(_) => return Ok(true),
            None => return Ok(false),
        }
    }
}

fn handle_list<B, R, I, O>(api: &CatalogApi<B, R>, console: &mut Console<I, O>) -> io::Result<bool>
where
    B: StorageBackend,
    R: Renderer + 'static,
    I: BufRead,
    O: Write,
{
    writeln!(console.out(), "{}", "=== Records ===".bold())?;
    let result = api.list_records();
    print_records(console.out(), &result.listed_records)?;
    print_messages(console.out(), &result.messages)?;
    Ok(true)
}

fn handle_delete<B, R, I, O>(
    api: &mut CatalogApi<B, R>,
    console: &mut Console<I, O>,
) -> io::Result<bool>
where
    B: StorageBackend,
    R: Renderer + 'static,
    I: BufRead,
    O: Write,
{
    writeln!(console.out(), "{}", "=== Delete Record ===".bold())?;
    let Some(id) = console.prompt("Code of the record to delete: ")? else {
        return Ok(false);
    };

    match api.delete_record(&id) {
        Ok(result) => print_messages(console.out(), &result.messages)?,
        Err(e) => print_error(console.out(), &e)?,
    }
    Ok(true)
}

fn handle_edit<B, R, I, O>(api: &mut CatalogApi<B, R>, console: &mut Console<I, O>) -> io::Result<bool>
where
    B: StorageBackend,
    R: Renderer + 'static,
    I: BufRead,
    O: Write,
{
    writeln!(console.out(), "{}", "=== Edit Record ===".bold())?;
    let Some(id) = console.prompt("Code of the record to edit: ")? else {
        return Ok(false);
    };

    if api.get_record(&id).is_none() {
        writeln!(console.out(), "{}", format!("Record not found: {}", id).red())?;
        return Ok(true);
    }

    writeln!(console.out(), "Enter the new details for this record:")?;
    let Some(fields) = console.prompt_fields()? else {
        return Ok(false);
    };

    match api.edit_record(&id, fields) {
        Ok(result) => print_messages(console.out(), &result.messages)?,
        Err(e) => print_error(console.out(), &e)?,
    }
    Ok(true)
}

fn handle_export_one<B, R, I, O>(
    api: &CatalogApi<B, R>,
    console: &mut Console<I, O>,
) -> io::Result<bool>
where
    B: StorageBackend,
    R: Renderer + 'static,
    I: BufRead,
    O: Write,
{
    writeln!(console.out(), "{}", "=== Export Record ===".bold())?;
    let listing = api.list_records();
    print_records(console.out(), &listing.listed_records)?;
    if listing.listed_records.is_empty() {
        print_messages(console.out(), &listing.messages)?;
        return Ok(true);
    }

    let Some(input) = console.prompt("Code of the record to export (or 'all'): ")? else {
        return Ok(false);
    };
    let selector: ExportSelector = match input.parse() {
        Ok(selector) => selector,
        Err(never) => match never {},
    };
    handle_export(api, console, &selector)
}

fn handle_export<B, R, I, O>(
    api: &CatalogApi<B, R>,
    console: &mut Console<I, O>,
    selector: &ExportSelector,
) -> io::Result<bool>
where
    B: StorageBackend,
    R: Renderer + 'static,
    I: BufRead,
    O: Write,
{
    match api.export(selector) {
        Ok(result) => print_messages(console.out(), &result.messages)?,
        Err(e) => print_error(console.out(), &e)?,
    }
    writeln!(console.out(), "{}", "Back to the main menu...".dimmed())?;
    Ok(true)
}
