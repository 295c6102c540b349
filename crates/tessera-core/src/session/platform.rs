use crate::{
    stmt::{Type, Value},
    Error, Result,
};

/// Converts values to the data types of database columns.
#[derive(Debug, Default, Clone)]
pub struct Platform {
    /// Trim trailing blanks from strings, as fixed-width `CHAR` columns pad
    /// them.
    pub trim_strings: bool,
}

impl Platform {
    pub fn new() -> Platform {
        Platform::default()
    }

    pub fn trim_strings(mut self, trim: bool) -> Platform {
        self.trim_strings = trim;
        self
    }

    /// Converts `value` to `ty`. `Null` converts to every type.
    pub fn convert(&self, value: Value, ty: &Type) -> Result<Value> {
        let converted = match (value, ty) {
            (Value::Null, _) => Value::Null,
            (Value::String(s), Type::String) if self.trim_strings => {
                Value::String(s.trim_end().to_string())
            }
            (value, ty) if value.is_a(ty) => value,

            (Value::I32(v), Type::I64) => Value::I64(v.into()),
            (Value::I64(v), Type::I32) => match i32::try_from(v) {
                Ok(v) => Value::I32(v),
                Err(_) => return Err(Error::type_conversion(Value::I64(v), ty.to_string())),
            },
            (Value::I32(v), Type::String) => Value::String(v.to_string()),
            (Value::I64(v), Type::String) => Value::String(v.to_string()),

            (Value::String(s), Type::I32) => parse(s, ty, |s| s.parse().map(Value::I32))?,
            (Value::String(s), Type::I64) => parse(s, ty, |s| s.parse().map(Value::I64))?,
            (Value::String(s), Type::Uuid) => {
                let parsed = uuid::Uuid::parse_str(s.trim());
                match parsed {
                    Ok(v) => Value::Uuid(v),
                    Err(err) => {
                        return Err(Error::from(err)
                            .context(Error::type_conversion(Value::String(s), ty.to_string())))
                    }
                }
            }
            (Value::Uuid(v), Type::String) => Value::String(v.to_string()),

            (Value::Bool(v), Type::I32) => Value::I32(v.into()),
            (Value::Bool(v), Type::I64) => Value::I64(v.into()),
            (Value::I32(v), Type::Bool) if v == 0 || v == 1 => Value::Bool(v == 1),
            (Value::I64(v), Type::Bool) if v == 0 || v == 1 => Value::Bool(v == 1),
            (Value::String(s), Type::Bool) => match s.trim() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => return Err(Error::type_conversion(Value::String(s), ty.to_string())),
            },
            (Value::Bool(v), Type::String) => Value::String(v.to_string()),

            (value, ty) => return Err(Error::type_conversion(value, ty.to_string())),
        };

        Ok(converted)
    }
}

fn parse<E>(
    s: String,
    ty: &Type,
    f: impl FnOnce(&str) -> std::result::Result<Value, E>,
) -> Result<Value>
where
    Error: From<E>,
{
    match f(s.trim()) {
        Ok(value) => Ok(value),
        Err(err) => {
            Err(Error::from(err).context(Error::type_conversion(Value::String(s), ty.to_string())))
        }
    }
}
