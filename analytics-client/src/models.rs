use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Идентификатор сущности удалённого сервиса.
///
/// Сервис может прислать id числом или строкой; форма сохраняется как есть,
/// поэтому `1` и `"1"` считаются разными идентификаторами.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// Числовой идентификатор.
    Num(i64),
    /// Строковый идентификатор.
    Text(String),
    /// Число вне `i64` (дробное или слишком большое), хранится как пришло.
    Number(Number),
}

impl Id {
    /// Пустой id (`0` или `""`) не пригоден как ссылка на автора.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Num(value) => *value == 0,
            Self::Text(value) => value.is_empty(),
            Self::Number(value) => value.as_f64() == Some(0.0),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => Some(
                number
                    .as_i64()
                    .map(Self::Num)
                    .unwrap_or_else(|| Self::Number(number.clone())),
            ),
            Value::String(text) => Some(Self::Text(text.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

impl FromStr for Id {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Ok(raw
            .parse::<i64>()
            .map(Self::Num)
            .unwrap_or_else(|_| Self::Text(raw.to_string())))
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self::Num(value)
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Self::Num(i64::from(value))
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Пользователь удалённого сервиса.
pub struct User {
    /// Идентификатор пользователя (может отсутствовать в ответе).
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<Id>,
    /// Отображаемое имя.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
}

impl User {
    /// Создаёт пользователя с заданным id и именем.
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
        }
    }
}

/// Пост в том виде, в каком его прислал сервис.
///
/// Хранит исходный JSON-объект целиком: ответ на создание поста добавляется
/// в список без проверки формы, а сериализация возвращает тот же объект.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Post {
    fields: Map<String, Value>,
}

impl Post {
    /// Собирает пост из известных полей.
    pub fn new(
        id: impl Into<Id>,
        user_id: impl Into<Id>,
        content: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), id_to_json(id.into()));
        fields.insert("userId".to_string(), id_to_json(user_id.into()));
        fields.insert("content".to_string(), Value::String(content.into()));
        fields.insert("imageUrl".to_string(), Value::String(image_url.into()));
        Self { fields }
    }

    /// Идентификатор поста.
    pub fn id(&self) -> Option<Id> {
        self.fields.get("id").and_then(Id::from_json)
    }

    /// Идентификатор автора.
    pub fn user_id(&self) -> Option<Id> {
        self.fields.get("userId").and_then(Id::from_json)
    }

    /// Текст поста.
    pub fn content(&self) -> Option<&str> {
        self.fields.get("content").and_then(Value::as_str)
    }

    /// URL изображения.
    pub fn image_url(&self) -> Option<&str> {
        self.fields.get("imageUrl").and_then(Value::as_str)
    }

    /// Исходный JSON-объект поста.
    pub fn as_json(&self) -> &Map<String, Value> {
        &self.fields
    }
}

fn id_to_json(id: Id) -> Value {
    match id {
        Id::Num(value) => Value::from(value),
        Id::Text(value) => Value::String(value),
        Id::Number(value) => Value::Number(value),
    }
}

// Поля списков пользователей и комментариев читаются без проверки типа:
// одна странная запись не должна ронять разбор всего ответа.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Id>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(Id::from_json(&value))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Комментарий к посту.
pub struct Comment {
    /// Идентификатор комментария.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<Id>,
    /// Текст комментария.
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Несохранённое состояние формы нового поста.
pub struct Draft {
    /// Текст поста.
    pub content: String,
    /// URL изображения.
    pub image_url: String,
}

impl Draft {
    /// Создаёт черновик.
    pub fn new(content: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            image_url: image_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Тело запроса `POST /posts`.
pub struct NewPost {
    /// Автор поста.
    pub user_id: Id,
    /// Текст поста.
    pub content: String,
    /// URL изображения.
    pub image_url: String,
}
