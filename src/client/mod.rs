mod field;

pub use field::{validate_field, Field, FieldRules, PHONE_PATTERN};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// Delimiter used when none is given
pub const DEFAULT_DELIMITER: char = ',';

/// Number of fields in a delimited record
pub const FIELD_COUNT: usize = Field::ALL.len();

/// A client record whose fields always satisfy their validation rules.
///
/// Every way of producing or changing a `Client` goes through the same
/// per-field validator, so a value of this type is never observed in an
/// invalid state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ClientRecord")]
pub struct Client {
    surname: String,
    name: String,
    patronymic: String,
    address: String,
    phone: String,
}

/// Unvalidated shape of a stored client; converted through `Client::new`
#[derive(Deserialize)]
struct ClientRecord {
    surname: String,
    name: String,
    #[serde(default)]
    patronymic: String,
    address: String,
    phone: String,
}

impl TryFrom<ClientRecord> for Client {
    type Error = ClientError;

    fn try_from(record: ClientRecord) -> Result<Self> {
        Client::new(
            record.surname,
            record.name,
            record.patronymic,
            record.address,
            record.phone,
        )
    }
}

impl Client {
    pub fn new(
        surname: impl Into<String>,
        name: impl Into<String>,
        patronymic: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            surname: Field::Surname.validate(surname.into())?,
            name: Field::Name.validate(name.into())?,
            patronymic: Field::Patronymic.validate(patronymic.into())?,
            address: Field::Address.validate(address.into())?,
            phone: Field::Phone.validate(phone.into())?,
        })
    }

    /// Parse `surname<d>name<d>patronymic<d>address<d>phone`, trimming each segment
    pub fn from_delimited(record: &str, delimiter: char) -> Result<Self> {
        let parts: Vec<&str> = record.split(delimiter).map(str::trim).collect();
        let &[surname, name, patronymic, address, phone] = parts.as_slice() else {
            return Err(ClientError::MalformedRecord {
                expected: FIELD_COUNT,
                actual: parts.len(),
            });
        };

        Self::new(surname, name, patronymic, address, phone)
    }

    /// Parse a JSON object carrying all five keys. Extra keys are ignored.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ClientError::InvalidJson(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(ClientError::InvalidJson("expected a JSON object".to_string()));
        };

        let missing: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|field| !map.contains_key(field.as_str()))
            .collect();
        if !missing.is_empty() {
            return Err(ClientError::MissingKeys(missing));
        }

        let take = |field: Field| match map.get(field.as_str()) {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(ClientError::InvalidJson(format!("{field} must be a string"))),
        };

        Self::new(
            take(Field::Surname)?,
            take(Field::Name)?,
            take(Field::Patronymic)?,
            take(Field::Address)?,
            take(Field::Phone)?,
        )
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patronymic(&self) -> &str {
        &self.patronymic
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Surname => &self.surname,
            Field::Name => &self.name,
            Field::Patronymic => &self.patronymic,
            Field::Address => &self.address,
            Field::Phone => &self.phone,
        }
    }

    /// Replace one field. On error the previous value is kept.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<()> {
        let value = field.validate(value.into())?;
        let slot = match field {
            Field::Surname => &mut self.surname,
            Field::Name => &mut self.name,
            Field::Patronymic => &mut self.patronymic,
            Field::Address => &mut self.address,
            Field::Phone => &mut self.phone,
        };
        *slot = value;
        Ok(())
    }

    pub fn set_surname(&mut self, value: impl Into<String>) -> Result<()> {
        self.set(Field::Surname, value)
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> Result<()> {
        self.set(Field::Name, value)
    }

    pub fn set_patronymic(&mut self, value: impl Into<String>) -> Result<()> {
        self.set(Field::Patronymic, value)
    }

    pub fn set_address(&mut self, value: impl Into<String>) -> Result<()> {
        self.set(Field::Address, value)
    }

    pub fn set_phone(&mut self, value: impl Into<String>) -> Result<()> {
        self.set(Field::Phone, value)
    }

    /// Render as a delimited record that `from_delimited` reads back unchanged.
    ///
    /// Fails if a field contains the delimiter or has surrounding whitespace,
    /// since neither would survive the split-and-trim on the way back in.
    pub fn to_delimited(&self, delimiter: char) -> Result<String> {
        let mut parts = Vec::with_capacity(FIELD_COUNT);
        for field in Field::ALL {
            let value = self.get(field);
            if value.contains(delimiter) || value.trim() != value {
                return Err(ClientError::UnencodableField { field, delimiter });
            }
            parts.push(value);
        }
        let separator = delimiter.to_string();
        Ok(parts.join(separator.as_str()))
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({
            "surname": self.surname,
            "name": self.name,
            "patronymic": self.patronymic,
            "address": self.address,
            "phone": self.phone,
        })
        .to_string()
    }

    /// Short form naming the client, for logs and tables
    pub fn summary(&self) -> ClientSummary<'_> {
        ClientSummary(self)
    }
}

impl FromStr for Client {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_delimited(s, DEFAULT_DELIMITER)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, field) in Field::ALL.into_iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            let value = match self.get(field) {
                v if v.trim().is_empty() => "-",
                v => v,
            };
            write!(f, "{:<11} {}", format!("{}:", field.label()), value)?;
        }
        Ok(())
    }
}

pub struct ClientSummary<'a>(&'a Client);

impl fmt::Display for ClientSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client({} {})", self.0.name, self.0.surname)
    }
}
