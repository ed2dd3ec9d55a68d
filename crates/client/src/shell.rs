//! Interactive menu shell
//!
//! Collects input line by line, builds fully-formed requests and hands them
//! to the components. Generic over its input and output so it can be driven
//! from a buffer in tests.

use std::io::{BufRead, Write};
use std::str::FromStr;

use openmrs_core::{AddressInput, IdentifierInput, PersonInput};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::client::OpenMrsClient;
use crate::error::ShellError;
use crate::reader::PatientReader;
use crate::session::{Session, SessionManager};
use crate::writer::PatientWriter;

/// Numbered menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    FetchByName,
    Create,
    Update,
    Delete,
    ListDeceased,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::FetchByName),
            "2" => Ok(MenuChoice::Create),
            "3" => Ok(MenuChoice::Update),
            "4" => Ok(MenuChoice::Delete),
            "5" => Ok(MenuChoice::ListDeceased),
            "6" => Ok(MenuChoice::Exit),
            _ => Err(()),
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

pub struct Shell<R, W> {
    sessions: SessionManager,
    reader: PatientReader,
    writer: PatientWriter,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(client: OpenMrsClient, input: R, output: W) -> Self {
        Self {
            sessions: SessionManager::new(client.clone()),
            reader: PatientReader::new(client.clone()),
            writer: PatientWriter::new(client),
            input,
            output,
        }
    }

    /// Log in, run the menu until exit (or end of input), then log out.
    ///
    /// A failed login returns before the menu is shown.
    pub async fn run(&mut self) -> Result<(), ShellError> {
        let session = self.sessions.login().await.map_err(ShellError::Login)?;
        writeln!(self.output, "Logged in successfully!")?;

        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Exit) => Flow::Exit,
                Ok(choice) => self.dispatch(&session, choice).await?,
                Err(()) => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        match self.sessions.logout(&session).await {
            Ok(()) => writeln!(self.output, "Logged out successfully.")?,
            Err(e) => writeln!(self.output, "Logout failed: {e}")?,
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<(), ShellError> {
        writeln!(self.output, "\nSelect an option:")?;
        writeln!(self.output, "1. Fetch patient by name")?;
        writeln!(self.output, "2. Create patient")?;
        writeln!(self.output, "3. Update patient")?;
        writeln!(self.output, "4. Delete patient")?;
        writeln!(self.output, "5. List dead patients")?;
        writeln!(self.output, "6. Exit")?;
        Ok(())
    }

    async fn dispatch(&mut self, session: &Session, choice: MenuChoice) -> Result<Flow, ShellError> {
        tracing::debug!(?choice, "Menu selection");
        match choice {
            MenuChoice::FetchByName => self.fetch_by_name(session).await,
            MenuChoice::Create => self.create(session).await,
            MenuChoice::Update => self.update(session).await,
            MenuChoice::Delete => self.delete(session).await,
            MenuChoice::ListDeceased => self.list_deceased(session).await,
            MenuChoice::Exit => Ok(Flow::Exit),
        }
    }

    async fn fetch_by_name(&mut self, session: &Session) -> Result<Flow, ShellError> {
        let Some(name) = self.prompt("Enter patient name: ")? else {
            return Ok(Flow::Exit);
        };

        match self.reader.fetch_by_name(session, &name).await {
            Ok(envelope) => self.print_json(&envelope)?,
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(Flow::Continue)
    }

    async fn create(&mut self, session: &Session) -> Result<Flow, ShellError> {
        let Some(person) = self.collect_person()? else {
            return Ok(Flow::Exit);
        };
        let person = match person {
            Ok(person) => person,
            Err(e) => {
                writeln!(self.output, "Invalid input: {e}")?;
                return Ok(Flow::Continue);
            }
        };

        let Some(identifier) = self.collect_identifier()? else {
            return Ok(Flow::Exit);
        };
        let identifier = match identifier {
            Ok(identifier) => identifier,
            Err(e) => {
                writeln!(self.output, "Invalid input: {e}")?;
                return Ok(Flow::Continue);
            }
        };

        match self.writer.create_patient(session, &person, &identifier).await {
            Ok(patient) => {
                writeln!(
                    self.output,
                    "Patient created successfully with identifier: {}",
                    identifier.identifier
                )?;
                self.print_json(&patient)?;
            }
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(Flow::Continue)
    }

    async fn update(&mut self, session: &Session) -> Result<Flow, ShellError> {
        let Some(id) = self.prompt("Enter patient ID to update: ")? else {
            return Ok(Flow::Exit);
        };
        writeln!(self.output, "Enter updated patient data as JSON:")?;
        let Some(raw) = self.prompt("Updated patient data: ")? else {
            return Ok(Flow::Exit);
        };

        let patient: JsonValue = match serde_json::from_str(&raw) {
            Ok(patient) => patient,
            Err(e) => {
                writeln!(self.output, "Invalid JSON format: {e}")?;
                return Ok(Flow::Continue);
            }
        };

        match self.writer.update_patient(session, &id, &patient).await {
            Ok(updated) => {
                writeln!(self.output, "Patient updated successfully.")?;
                self.print_json(&updated)?;
            }
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(Flow::Continue)
    }

    async fn delete(&mut self, session: &Session) -> Result<Flow, ShellError> {
        let Some(id) = self.prompt("Enter patient ID to delete: ")? else {
            return Ok(Flow::Exit);
        };

        match self.writer.delete_patient(session, &id).await {
            Ok(()) => writeln!(self.output, "Patient deleted successfully.")?,
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(Flow::Continue)
    }

    async fn list_deceased(&mut self, session: &Session) -> Result<Flow, ShellError> {
        match self.reader.list_deceased(session).await {
            Ok(envelope) => self.print_json(&envelope)?,
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(Flow::Continue)
    }

    /// Prompt for every person field. `None` means input ended.
    fn collect_person(
        &mut self,
    ) -> Result<Option<Result<PersonInput, openmrs_core::ValidationError>>, ShellError> {
        let labels = [
            "Enter given name: ",
            "Enter family name: ",
            "Enter gender (M/F): ",
            "Enter birthdate (YYYY-MM-DD): ",
            "Enter address: ",
            "Enter city/village: ",
            "Enter country: ",
            "Enter postal code: ",
        ];
        let Some(values) = self.prompt_all(&labels)? else {
            return Ok(None);
        };
        let [given, family, gender, birthdate, address1, city_village, country, postal_code] =
            values;

        let address = AddressInput {
            address1,
            city_village,
            country,
            postal_code,
        };
        Ok(Some(PersonInput::parse(
            &given, &family, &gender, &birthdate, address,
        )))
    }

    fn collect_identifier(
        &mut self,
    ) -> Result<Option<Result<IdentifierInput, openmrs_core::ValidationError>>, ShellError> {
        let labels = [
            "Enter the identifier (e.g., '111:CLINIC1'): ",
            "Enter the location name (e.g., 'Outpatient Clinic'): ",
            "Is this identifier preferred? (true/false): ",
        ];
        let Some([identifier, location, preferred]) = self.prompt_all(&labels)? else {
            return Ok(None);
        };
        Ok(Some(IdentifierInput::parse(&identifier, &location, &preferred)))
    }

    fn prompt_all<const N: usize>(
        &mut self,
        labels: &[&str; N],
    ) -> Result<Option<[String; N]>, ShellError> {
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (value, label) in values.iter_mut().zip(labels) {
            match self.prompt(label)? {
                Some(line) => *value = line,
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    /// Print a label and read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, ShellError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print_json<T: Serialize>(&mut self, value: &T) -> Result<(), ShellError> {
        serde_json::to_writer_pretty(&mut self.output, value).map_err(std::io::Error::from)?;
        writeln!(self.output)?;
        Ok(())
    }
}
