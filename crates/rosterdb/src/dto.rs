use rosterdb_core::{
    projection::{Column, FieldWrite, FromRow, ProjectError, PropertyWrite, Row},
    traits::FieldValue,
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// MemberDto
///
/// Read-only username/age pair, constructed fresh per query and never fed
/// back into the store. Implements all three mapping strategies; with
/// matching column names they produce identical output.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i64,
}

impl MemberDto {
    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub const fn set_age(&mut self, age: i64) {
        self.age = age;
    }
}

impl FieldWrite for MemberDto {
    fn write_field(&mut self, column: &str, value: &Value) -> bool {
        match column {
            "username" => match <Option<String>>::from_value(value) {
                Some(username) => {
                    self.username = username;
                    true
                }
                None => false,
            },
            "age" => match i64::from_value(value) {
                Some(age) => {
                    self.age = age;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

impl PropertyWrite for MemberDto {
    fn write_property(&mut self, column: &str, value: &Value) -> bool {
        match column {
            "username" => match <Option<String>>::from_value(value) {
                Some(username) => {
                    self.set_username(username);
                    true
                }
                None => false,
            },
            "age" => match i64::from_value(value) {
                Some(age) => {
                    self.set_age(age);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

impl FromRow for MemberDto {
    const COLUMNS: &'static [Column] = &[
        Column::for_field::<Option<String>>("username"),
        Column::for_field::<i64>("age"),
    ];

    fn from_row(row: &Row) -> Result<Self, ProjectError> {
        Ok(Self {
            username: row.get(0)?,
            age: row.get(1)?,
        })
    }
}

///
/// UserDto
///
/// The same pair under a different field name. The name-matched strategies
/// drop the `username` column here (observably), since no `name` column
/// arrives; the constructor strategy matches by position and type only, so
/// it fills `name` regardless.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UserDto {
    pub name: Option<String>,
    pub age: i64,
}

impl UserDto {
    /// Setter-path normalization: names are stored trimmed. The
    /// field-direct strategy bypasses this.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name.map(|name| name.trim().to_string());
    }

    pub const fn set_age(&mut self, age: i64) {
        self.age = age;
    }
}

impl FieldWrite for UserDto {
    fn write_field(&mut self, column: &str, value: &Value) -> bool {
        match column {
            "name" => match <Option<String>>::from_value(value) {
                Some(name) => {
                    self.name = name;
                    true
                }
                None => false,
            },
            "age" => match i64::from_value(value) {
                Some(age) => {
                    self.age = age;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

impl PropertyWrite for UserDto {
    fn write_property(&mut self, column: &str, value: &Value) -> bool {
        match column {
            "name" => match <Option<String>>::from_value(value) {
                Some(name) => {
                    self.set_name(name);
                    true
                }
                None => false,
            },
            "age" => match i64::from_value(value) {
                Some(age) => {
                    self.set_age(age);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

impl FromRow for UserDto {
    const COLUMNS: &'static [Column] = &[
        Column::for_field::<Option<String>>("name"),
        Column::for_field::<i64>("age"),
    ];

    fn from_row(row: &Row) -> Result<Self, ProjectError> {
        Ok(Self {
            name: row.get(0)?,
            age: row.get(1)?,
        })
    }
}

///
/// TESTS
///
