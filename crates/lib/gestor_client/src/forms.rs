//! Form state and client-side validation for the product and register
//! forms. Fields are validated on every change and again on submit; a
//! submit yields a request value only when every field is valid.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::NewProduct;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern")
}

static ONLY_DIGITS: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[0-9]+$"));
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^\s*([0-9]+(?:\.[0-9]*)?|\.[0-9]+)"));
static NAME_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$"));
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));
static NOT_PRICE_CHAR: LazyLock<Regex> = LazyLock::new(|| pattern(r"[^0-9.]"));
static HAS_DIGIT: LazyLock<Regex> = LazyLock::new(|| pattern(r"[0-9]"));
static HAS_UPPER: LazyLock<Regex> = LazyLock::new(|| pattern(r"[A-Z]"));
static HAS_LOWER: LazyLock<Regex> = LazyLock::new(|| pattern(r"[a-z]"));

/// Highest price the product form accepts.
pub const MAX_PRICE: f64 = 50_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductField {
    Name,
    Price,
    Description,
}

/// The product creation form.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    name: String,
    price: String,
    description: String,
    errors: BTreeMap<ProductField, &'static str>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update a field. Price input keeps only digits and dots; the live
    /// error reflects what was typed.
    pub fn set(&mut self, field: ProductField, value: &str) {
        let stored = match field {
            ProductField::Price => NOT_PRICE_CHAR.replace_all(value, "").into_owned(),
            _ => value.to_string(),
        };
        *self.slot(field) = stored;
        self.record(field, validate_product_field(field, value));
    }

    pub fn value(&self, field: ProductField) -> &str {
        match field {
            ProductField::Name => &self.name,
            ProductField::Price => &self.price,
            ProductField::Description => &self.description,
        }
    }

    pub fn error(&self, field: ProductField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Validate everything; on success return the request body.
    pub fn submit(&mut self) -> Option<NewProduct> {
        for field in [ProductField::Name, ProductField::Price, ProductField::Description] {
            let err = validate_product_field(field, self.value(field));
            self.record(field, err);
        }
        if !self.is_valid() {
            return None;
        }
        Some(NewProduct {
            name: self.name.trim().to_string(),
            price: parse_leading_float(&self.price).unwrap_or(0.0),
            description: self.description.trim().to_string(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn slot(&mut self, field: ProductField) -> &mut String {
        match field {
            ProductField::Name => &mut self.name,
            ProductField::Price => &mut self.price,
            ProductField::Description => &mut self.description,
        }
    }

    fn record(&mut self, field: ProductField, err: Option<&'static str>) {
        match err {
            Some(msg) => {
                self.errors.insert(field, msg);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}

pub fn validate_product_field(field: ProductField, value: &str) -> Option<&'static str> {
    match field {
        ProductField::Name => {
            let name = value.trim();
            if name.is_empty() {
                Some("El nombre es requerido")
            } else if ONLY_DIGITS.is_match(name) {
                Some("El nombre no puede ser solo números")
            } else {
                None
            }
        }
        ProductField::Price => {
            if value.is_empty() {
                return Some("El precio es requerido");
            }
            match parse_leading_float(value) {
                None => Some("El precio debe ser un número válido"),
                Some(p) if p > MAX_PRICE => Some("Usa una cantidad real (máximo 50,000)"),
                Some(_) => None,
            }
        }
        ProductField::Description => {
            if value.trim().is_empty() {
                Some("La descripción es requerida")
            } else {
                None
            }
        }
    }
}

/// Parse the longest numeric prefix of `s` (`"12.5kg"` -> 12.5).
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let number = LEADING_NUMBER.captures(s)?.get(1)?.as_str();
    number.trim_end_matches('.').parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegisterField {
    Name,
    Email,
    Password,
}

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The sign-up form.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    name: String,
    email: String,
    password: String,
    errors: BTreeMap<RegisterField, &'static str>,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: RegisterField, value: &str) {
        let slot = match field {
            RegisterField::Name => &mut self.name,
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
        };
        *slot = value.to_string();
        self.record(field, validate_register_field(field, value));
    }

    pub fn value(&self, field: RegisterField) -> &str {
        match field {
            RegisterField::Name => &self.name,
            RegisterField::Email => &self.email,
            RegisterField::Password => &self.password,
        }
    }

    pub fn error(&self, field: RegisterField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn submit(&mut self) -> Option<Registration> {
        for field in [RegisterField::Name, RegisterField::Email, RegisterField::Password] {
            let err = validate_register_field(field, self.value(field));
            self.record(field, err);
        }
        if !self.errors.is_empty() {
            return None;
        }
        Some(Registration {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    fn record(&mut self, field: RegisterField, err: Option<&'static str>) {
        match err {
            Some(msg) => {
                self.errors.insert(field, msg);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}

pub fn validate_register_field(field: RegisterField, value: &str) -> Option<&'static str> {
    match field {
        RegisterField::Name => {
            let name = value.trim();
            if name.is_empty() {
                Some("El nombre es requerido")
            } else if name.chars().count() < 2 {
                Some("El nombre debe tener al menos 2 caracteres")
            } else if !NAME_LETTERS.is_match(name) {
                Some("El nombre solo debe contener letras")
            } else {
                None
            }
        }
        RegisterField::Email => {
            let email = value.trim();
            if email.is_empty() {
                Some("El correo electrónico es requerido")
            } else if !EMAIL_SHAPE.is_match(email) {
                Some("Ingrese un correo electrónico válido")
            } else {
                None
            }
        }
        RegisterField::Password => {
            if value.is_empty() {
                Some("La contraseña es requerida")
            } else if value.chars().count() < 6 {
                Some("La contraseña debe tener al menos 6 caracteres")
            } else if !HAS_DIGIT.is_match(value) {
                Some("La contraseña debe contener al menos un número")
            } else if !HAS_UPPER.is_match(value) {
                Some("La contraseña debe contener al menos una mayúscula")
            } else if !HAS_LOWER.is_match(value) {
                Some("La contraseña debe contener al menos una minúscula")
            } else {
                None
            }
        }
    }
}
