//! # Validation
//!
//! Structural recursive descent of a configuration value against a schema
//! node, collecting every failure with the path where it was found.
//!
//! ## Rules
//!
//! - A value of the wrong basic type yields one `type_mismatch` error and
//!   nothing below it is checked.
//! - Otherwise every failed aspect of the node is reported independently:
//!   length, pattern, and enum membership for strings; range, step, and
//!   wholeness for numbers; item count for arrays.
//! - Arrays validate every element at `[...path, index]`.
//! - Objects report each missing required name at `[...path, name]`, then
//!   check each present key against its declared property, the
//!   `additionalProperties` schema, or the closed-object rule.
//! - Dictionaries validate every value against the shared value schema;
//!   keys are never constrained.
//! - References validate against the resolved node. A dangling reference
//!   accepts the value and records a [`SchemaIssue`].
//! - Unions follow [`UnionMode`].
//!
//! ## Output Contract
//!
//! Validation never fails. The report's `errors` being empty is the only
//! success signal. Structural problems with the schema itself (dangling
//! references, hitting the depth limit) go to `schema_issues`, never to
//! `errors`.

use std::fmt;

use cfgb_core::{kind_name, ValuePath};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::document::SchemaDocument;
use crate::model::{
    AdditionalProperties, ArraySchema, Combinator, NumericConstraints, ObjectSchema, SchemaKind,
    SchemaNode, StringConstraints, UnionSchema,
};
use crate::options::{EngineOptions, UnionMode};

/// Tolerance used when checking `multipleOf` on non-integer numbers.
const MULTIPLE_OF_EPSILON: f64 = 1e-9;

/// Machine-readable category of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The value's basic type does not match the node.
    TypeMismatch,
    /// A required object property is absent.
    Required,
    /// A key not allowed by a closed object.
    UnexpectedProperty,
    /// String shorter than `minLength`.
    MinLength,
    /// String longer than `maxLength`.
    MaxLength,
    /// String does not match `pattern`.
    Pattern,
    /// Value outside the `enum` set.
    Enum,
    /// Number below `minimum`.
    Minimum,
    /// Number above `maximum`.
    Maximum,
    /// Number not above `exclusiveMinimum`.
    ExclusiveMinimum,
    /// Number not below `exclusiveMaximum`.
    ExclusiveMaximum,
    /// Number not a multiple of `multipleOf`.
    MultipleOf,
    /// Fractional number where an integer is required.
    NotInteger,
    /// Array shorter than `minItems`.
    MinItems,
    /// Array longer than `maxItems`.
    MaxItems,
}

/// One data failure found during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Where in the configuration value the failure is.
    pub path: ValuePath,
    /// Category of the failure.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
    /// The offending value, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValidationError {
    fn new(path: &ValuePath, code: ErrorCode, message: String, value: Option<&Value>) -> Self {
        Self {
            path: path.clone(),
            code,
            message,
            value: value.cloned(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A problem with the schema met while validating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaIssue {
    /// A reference did not resolve; the value at `path` was accepted.
    UnresolvedReference {
        /// Value path where the reference was met.
        path: ValuePath,
        /// The reference string.
        reference: String,
    },
    /// Recursion stopped at `path` without checking further.
    DepthLimitExceeded {
        /// Value path where descent stopped.
        path: ValuePath,
        /// The configured bound.
        max_depth: usize,
    },
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaIssue::UnresolvedReference { path, reference } => {
                write!(f, "{path}: reference '{reference}' does not resolve")
            }
            SchemaIssue::DepthLimitExceeded { path, max_depth } => {
                write!(f, "{path}: validation depth limit of {max_depth} reached")
            }
        }
    }
}

/// Result of validating one value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Data failures, in discovery order.
    pub errors: Vec<ValidationError>,
    /// Schema problems met along the way.
    pub schema_issues: Vec<SchemaIssue>,
}

impl ValidationReport {
    /// True when no data failure was found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors reported exactly at `path`.
    pub fn errors_at<'a>(&'a self, path: &'a ValuePath) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| &e.path == path)
    }

    /// Number of errors with the given code.
    pub fn count(&self, code: ErrorCode) -> usize {
        self.errors.iter().filter(|e| e.code == code).count()
    }

    fn absorb(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.schema_issues.extend(other.schema_issues);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .errors
            .iter()
            .map(ToString::to_string)
            .chain(self.schema_issues.iter().map(|i| format!("(schema) {i}")));
        for (i, line) in lines.enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {line}")?;
        }
        Ok(())
    }
}

/// Validates configuration values against the nodes of one schema document.
#[derive(Debug, Clone)]
pub struct Validator<'d> {
    document: &'d SchemaDocument,
    options: EngineOptions,
}

impl<'d> Validator<'d> {
    /// A validator with default options.
    pub fn new(document: &'d SchemaDocument) -> Self {
        Self::with_options(document, EngineOptions::default())
    }

    /// A validator with explicit options.
    pub fn with_options(document: &'d SchemaDocument, options: EngineOptions) -> Self {
        Self { document, options }
    }

    /// Validate `value` against the document root.
    pub fn validate(&self, value: &Value) -> ValidationReport {
        self.validate_against(value, self.document.root(), &ValuePath::root())
    }

    /// Validate `value` against `node`, reporting paths below `path`.
    pub fn validate_against(
        &self,
        value: &Value,
        node: &SchemaNode,
        path: &ValuePath,
    ) -> ValidationReport {
        let mut report = ValidationReport::default();
        let mut path = path.clone();
        self.validate_into(value, node, &mut path, &mut report);
        report
    }

    /// Validate `value` against `node`, appending findings to `report`.
    ///
    /// `path` is restored to its original contents before returning.
    pub fn validate_into(
        &self,
        value: &Value,
        node: &SchemaNode,
        path: &mut ValuePath,
        report: &mut ValidationReport,
    ) {
        self.check(value, node, path, 0, report);
    }

    fn check(
        &self,
        value: &Value,
        node: &SchemaNode,
        path: &mut ValuePath,
        depth: usize,
        report: &mut ValidationReport,
    ) {
        if depth > self.options.max_depth {
            tracing::warn!(path = %path, max_depth = self.options.max_depth, "validation depth limit reached");
            report.schema_issues.push(SchemaIssue::DepthLimitExceeded {
                path: path.clone(),
                max_depth: self.options.max_depth,
            });
            return;
        }
        if value.is_null() && node.nullable {
            return;
        }

        let before = report.errors.len();
        match &node.kind {
            SchemaKind::Any => {}
            SchemaKind::Reference(reference) => match self.document.resolve(reference) {
                Some(target) => self.check(value, target, path, depth + 1, report),
                None => {
                    tracing::warn!(path = %path, reference = %reference, "unresolved schema reference, value accepted");
                    report.schema_issues.push(SchemaIssue::UnresolvedReference {
                        path: path.clone(),
                        reference: reference.clone(),
                    });
                }
            },
            SchemaKind::Union(union) => self.check_union(value, union, path, depth, report),
            kind => {
                if !type_matches(kind, value) {
                    report.errors.push(ValidationError::new(
                        path,
                        ErrorCode::TypeMismatch,
                        format!("expected {}, found {}", expected_type(kind), kind_name(value)),
                        Some(value),
                    ));
                    return;
                }
                match kind {
                    SchemaKind::String(constraints) => {
                        check_string(value, constraints, path, report);
                    }
                    SchemaKind::Number(constraints) => {
                        check_number(value, constraints, path, report);
                    }
                    SchemaKind::Integer(constraints) => {
                        if !is_whole(value) {
                            report.errors.push(ValidationError::new(
                                path,
                                ErrorCode::NotInteger,
                                "must be an integer".to_string(),
                                Some(value),
                            ));
                        }
                        check_number(value, constraints, path, report);
                    }
                    SchemaKind::Array(array) => self.check_array(value, array, path, depth, report),
                    SchemaKind::Object(object) => {
                        self.check_object(value, object, path, depth, report);
                    }
                    SchemaKind::Dictionary(values) => {
                        if let Value::Object(map) = value {
                            for (key, item) in map {
                                path.push(key.as_str());
                                self.check(item, values, path, depth + 1, report);
                                path.pop();
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        if let Some(allowed) = &node.enumeration {
            let mismatched = report.errors[before..]
                .iter()
                .any(|e| e.code == ErrorCode::TypeMismatch && e.path == *path);
            if !mismatched {
                check_enum(value, allowed, path, report);
            }
        }
    }

    fn check_array(
        &self,
        value: &Value,
        array: &ArraySchema,
        path: &mut ValuePath,
        depth: usize,
        report: &mut ValidationReport,
    ) {
        let Value::Array(items) = value else {
            return;
        };
        let len = items.len() as u64;
        if let Some(min) = array.min_items {
            if len < min {
                report.errors.push(ValidationError::new(
                    path,
                    ErrorCode::MinItems,
                    format!("must contain at least {min} items, found {len}"),
                    Some(value),
                ));
            }
        }
        if let Some(max) = array.max_items {
            if len > max {
                report.errors.push(ValidationError::new(
                    path,
                    ErrorCode::MaxItems,
                    format!("must contain at most {max} items, found {len}"),
                    Some(value),
                ));
            }
        }
        for (index, item) in items.iter().enumerate() {
            path.push(index);
            self.check(item, &array.items, path, depth + 1, report);
            path.pop();
        }
    }

    fn check_object(
        &self,
        value: &Value,
        object: &ObjectSchema,
        path: &mut ValuePath,
        depth: usize,
        report: &mut ValidationReport,
    ) {
        let Value::Object(map) = value else {
            return;
        };
        for name in &object.required {
            if !map.contains_key(name) {
                report.errors.push(ValidationError::new(
                    &path.child(name.as_str()),
                    ErrorCode::Required,
                    "missing required field".to_string(),
                    None,
                ));
            }
        }
        for (key, item) in map {
            path.push(key.as_str());
            match object.properties.get(key) {
                Some(property) => self.check(item, property, path, depth + 1, report),
                None => match &object.additional {
                    AdditionalProperties::Forbidden => {
                        report.errors.push(ValidationError::new(
                            path,
                            ErrorCode::UnexpectedProperty,
                            "unexpected property".to_string(),
                            Some(item),
                        ));
                    }
                    AdditionalProperties::Schema(extra) => {
                        self.check(item, extra, path, depth + 1, report);
                    }
                    AdditionalProperties::Allowed => {}
                },
            }
            path.pop();
        }
    }

    fn check_union(
        &self,
        value: &Value,
        union: &UnionSchema,
        path: &mut ValuePath,
        depth: usize,
        report: &mut ValidationReport,
    ) {
        if self.options.union_mode == UnionMode::PassThrough || union.alternatives.is_empty() {
            return;
        }

        if union.combinator == Combinator::AllOf {
            let mut scratches = Vec::with_capacity(union.alternatives.len());
            for alternative in &union.alternatives {
                let mut scratch = ValidationReport::default();
                self.check(value, alternative, path, depth + 1, &mut scratch);
                scratches.push(scratch);
            }
            // A basic type mismatch is reported once, whichever alternative saw it.
            match scratches.iter().position(|s| is_type_mismatch_at(s, path)) {
                Some(first) => {
                    let mismatch = scratches.swap_remove(first);
                    report.absorb(mismatch);
                }
                None => {
                    for scratch in scratches {
                        report.absorb(scratch);
                    }
                }
            }
            return;
        }

        let mut best: Option<ValidationReport> = None;
        let mut expected = Vec::new();
        for alternative in &union.alternatives {
            let mut scratch = ValidationReport::default();
            self.check(value, alternative, path, depth + 1, &mut scratch);
            if scratch.is_valid() {
                report.schema_issues.extend(scratch.schema_issues);
                return;
            }
            if is_type_mismatch_at(&scratch, path) {
                expected.push(self.describe(alternative));
                continue;
            }
            if best
                .as_ref()
                .map_or(true, |b| scratch.errors.len() < b.errors.len())
            {
                best = Some(scratch);
            }
        }

        match best {
            Some(closest) => report.absorb(closest),
            None => report.errors.push(ValidationError::new(
                path,
                ErrorCode::TypeMismatch,
                format!("expected one of {}, found {}", expected.join(", "), kind_name(value)),
                Some(value),
            )),
        }
    }

    /// Type name of a union alternative for the "expected one of" message.
    fn describe(&self, node: &SchemaNode) -> String {
        match self.document.dereference(node).map(|n| &n.kind) {
            Some(SchemaKind::Union(union)) => union
                .alternatives
                .iter()
                .map(|alt| self.describe(alt))
                .collect::<Vec<_>>()
                .join(", "),
            Some(kind) => expected_type(kind).to_string(),
            None => "reference".to_string(),
        }
    }
}

/// Validate `value` against the root of `document` with default options.
pub fn validate(document: &SchemaDocument, value: &Value) -> ValidationReport {
    Validator::new(document).validate(value)
}

fn is_type_mismatch_at(report: &ValidationReport, path: &ValuePath) -> bool {
    matches!(
        report.errors.as_slice(),
        [only] if only.code == ErrorCode::TypeMismatch && &only.path == path
    )
}

fn type_matches(kind: &SchemaKind, value: &Value) -> bool {
    match kind {
        SchemaKind::String(_) => value.is_string(),
        SchemaKind::Number(_) | SchemaKind::Integer(_) => value.is_number(),
        SchemaKind::Boolean => value.is_boolean(),
        SchemaKind::Null => value.is_null(),
        SchemaKind::Array(_) => value.is_array(),
        SchemaKind::Object(_) | SchemaKind::Dictionary(_) => value.is_object(),
        SchemaKind::Reference(_) | SchemaKind::Union(_) | SchemaKind::Any => true,
    }
}

fn expected_type(kind: &SchemaKind) -> &'static str {
    match kind {
        SchemaKind::Object(_) | SchemaKind::Dictionary(_) => "object",
        other => other.tag(),
    }
}

fn check_string(
    value: &Value,
    constraints: &StringConstraints,
    path: &ValuePath,
    report: &mut ValidationReport,
) {
    let Value::String(text) = value else {
        return;
    };
    let len = text.chars().count() as u64;
    if let Some(min) = constraints.min_length {
        if len < min {
            report.errors.push(ValidationError::new(
                path,
                ErrorCode::MinLength,
                format!("must be at least {min} characters long"),
                Some(value),
            ));
        }
    }
    if let Some(max) = constraints.max_length {
        if len > max {
            report.errors.push(ValidationError::new(
                path,
                ErrorCode::MaxLength,
                format!("must be at most {max} characters long"),
                Some(value),
            ));
        }
    }
    if let Some(pattern) = &constraints.pattern {
        if !pattern.is_match(text) {
            report.errors.push(ValidationError::new(
                path,
                ErrorCode::Pattern,
                format!("must match pattern '{}'", pattern.as_str()),
                Some(value),
            ));
        }
    }
}

fn check_number(
    value: &Value,
    constraints: &NumericConstraints,
    path: &ValuePath,
    report: &mut ValidationReport,
) {
    let Some(n) = value.as_f64() else {
        return;
    };
    let bound = |b: &Option<Number>| b.as_ref().and_then(Number::as_f64);

    if let Some(min) = bound(&constraints.minimum) {
        if n < min {
            report.errors.push(ValidationError::new(
                path,
                ErrorCode::Minimum,
                format!("must be greater than or equal to {min}"),
                Some(value),
            ));
        }
    }
    if let Some(max) = bound(&constraints.maximum) {
        if n > max {
            report.errors.push(ValidationError::new(
                path,
                ErrorCode::Maximum,
                format!("must be less than or equal to {max}"),
                Some(value),
            ));
        }
    }
    if let Some(min) = bound(&constraints.exclusive_minimum) {
        if n <= min {
            report.errors.push(ValidationError::new(
                path,
                ErrorCode::ExclusiveMinimum,
                format!("must be greater than {min}"),
                Some(value),
            ));
        }
    }
    if let Some(max) = bound(&constraints.exclusive_maximum) {
        if n >= max {
            report.errors.push(ValidationError::new(
                path,
                ErrorCode::ExclusiveMaximum,
                format!("must be less than {max}"),
                Some(value),
            ));
        }
    }
    if let Some(step) = &constraints.multiple_of {
        if !is_multiple_of(value, step) {
            report.errors.push(ValidationError::new(
                path,
                ErrorCode::MultipleOf,
                format!("must be a multiple of {step}"),
                Some(value),
            ));
        }
    }
}

fn is_whole(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => true,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0),
        _ => false,
    }
}

fn is_multiple_of(value: &Value, step: &Number) -> bool {
    if let (Some(v), Some(s)) = (value.as_i64(), step.as_i64()) {
        return s != 0 && v % s == 0;
    }
    match (value.as_f64(), step.as_f64()) {
        (Some(v), Some(s)) if s != 0.0 => {
            let quotient = v / s;
            (quotient - quotient.round()).abs() < MULTIPLE_OF_EPSILON * quotient.abs().max(1.0)
        }
        _ => false,
    }
}

fn check_enum(value: &Value, allowed: &[Value], path: &ValuePath, report: &mut ValidationReport) {
    if allowed.iter().any(|candidate| same_literal(candidate, value)) {
        return;
    }
    let listed = allowed
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");
    report.errors.push(ValidationError::new(
        path,
        ErrorCode::Enum,
        format!("must be one of: {listed}"),
        Some(value),
    ));
}

/// Literal equality where `1` and `1.0` are the same number.
fn same_literal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}
