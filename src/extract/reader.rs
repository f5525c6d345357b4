//! Readers that turn generated source files into behaviour records.

use tracing::{debug, warn};

use super::comment::DocSummary;
use super::convention::Dialect;
use super::expression::{statement_expression, trimmed_expression};
use super::types::{ApplicationBehaviour, Behaviour, Entity};
use crate::error::{Error, Result};
use crate::syntax::{parse_source, MethodBody, MethodDecl, SourceUnit};

/// Namespaces of the generated code itself; never reported as imports.
pub const BEHAVIOUR_NAMESPACE_PREFIX: &str = "Omnia.Behaviours.";

/// Imports every generated file carries.
pub const DEFAULT_USINGS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.Linq",
    "System.Net",
    "System.Net.Http",
    "System.Net.Http.Formatting",
    "System.Threading.Tasks",
    "Newtonsoft.Json",
    "Microsoft.Extensions.DependencyInjection",
    "Omnia.Libraries.Infrastructure.Connector",
    "Omnia.Libraries.Infrastructure.Connector.Client",
    "Omnia.Libraries.Infrastructure.Behaviours",
    "Omnia.Libraries.Infrastructure.Behaviours.Query",
    "Omnia.Libraries.Infrastructure.Behaviours.Action",
];

/// Reads entity and data-access files, which hold any number of behaviours.
#[derive(Debug, Clone, Copy)]
pub struct BehaviourReader {
    dialect: Dialect,
}

impl BehaviourReader {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Reader for data-access files (`CreateAsync`, `ReadAsync`, ...).
    pub fn data_access() -> Self {
        Self::new(Dialect::DataAccess)
    }

    /// Reader for entity instance files (`ExecuteInitialize`, `Get<attr>`, ...).
    pub fn entity_instance() -> Self {
        Self::new(Dialect::EntityInstance)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Extract namespace, behaviours and custom imports.
    pub fn extract_entity(&self, source: &str) -> Result<Entity> {
        let unit = parse(source)?;
        Ok(Entity {
            namespace: single_namespace(&unit)?,
            behaviours: self.behaviours_of(&unit)?,
            usings: custom_usings(&unit),
        })
    }

    /// Extract only the behaviours.
    pub fn extract_behaviours(&self, source: &str) -> Result<Vec<Behaviour>> {
        let unit = parse(source)?;
        self.behaviours_of(&unit)
    }

    fn behaviours_of(&self, unit: &SourceUnit<'_>) -> Result<Vec<Behaviour>> {
        let mut behaviours = Vec::new();

        for method in &unit.methods {
            let Some((behaviour_type, attribute)) = self.dialect.classify(&method.identifier)
            else {
                if self.dialect.is_strict() {
                    return Err(Error::unsupported_behaviour(&method.identifier));
                }
                debug!(method = %method.identifier, dialect = %self.dialect, "Skipping method outside naming convention");
                continue;
            };

            let expression = method_expression(unit, method, self.dialect)?;
            if expression.is_empty() {
                debug!(method = %method.identifier, "Dropping behaviour with empty body");
                continue;
            }

            let doc = DocSummary::from_comments(&method.doc_comments);
            behaviours.push(Behaviour {
                name: doc
                    .name
                    .unwrap_or_else(|| self.dialect.method_name(&method.identifier).to_string()),
                description: doc.description,
                expression,
                behaviour_type,
                attribute,
            });
        }

        Ok(behaviours)
    }
}

/// Reads application behaviour files. The first method of the file is the
/// behaviour; any other methods are helpers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicationBehaviourReader;

impl ApplicationBehaviourReader {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_data(&self, source: &str) -> Result<ApplicationBehaviour> {
        let dialect = Dialect::Application;
        let unit = parse(source)?;
        let namespace = single_namespace(&unit)?;

        let method = unit
            .methods
            .first()
            .ok_or_else(|| Error::structural("application behaviour file declares no method"))?;
        if unit.methods.len() > 1 {
            debug!(
                method = %method.identifier,
                ignored = unit.methods.len() - 1,
                "Ignoring helper methods after the application behaviour"
            );
        }

        let doc = DocSummary::from_comments(&method.doc_comments);
        Ok(ApplicationBehaviour {
            namespace,
            name: doc
                .name
                .unwrap_or_else(|| dialect.method_name(&method.identifier).to_string()),
            description: doc.description,
            expression: method_expression(&unit, method, dialect)?,
            usings: custom_usings(&unit),
        })
    }
}

fn parse(source: &str) -> Result<SourceUnit<'_>> {
    let unit = parse_source(source)?;
    if unit.has_errors {
        warn!("Source contains syntax errors; extracting from the recovered tree");
    }
    Ok(unit)
}

fn single_namespace(unit: &SourceUnit<'_>) -> Result<String> {
    match unit.namespaces.as_slice() {
        [namespace] => Ok(namespace.clone()),
        [] => Err(Error::structural("no namespace declaration found")),
        many => Err(Error::structural(format!(
            "expected exactly one namespace declaration, found {}",
            many.len()
        ))),
    }
}

fn custom_usings(unit: &SourceUnit<'_>) -> Vec<String> {
    unit.usings
        .iter()
        .filter(|using| {
            !DEFAULT_USINGS.contains(&using.as_str())
                && !using.starts_with(BEHAVIOUR_NAMESPACE_PREFIX)
        })
        .cloned()
        .collect()
}

fn method_expression(unit: &SourceUnit<'_>, method: &MethodDecl, dialect: Dialect) -> Result<String> {
    match &method.body {
        MethodBody::Block(span) if dialect.trims_expression() => {
            Ok(trimmed_expression(unit.text(&span.block)))
        }
        MethodBody::Block(span) => Ok(statement_expression(unit, span)),
        MethodBody::Expression => Err(Error::structural(format!(
            "method `{}` at line {} has an expression body instead of a block",
            method.identifier, method.line
        ))),
        MethodBody::Missing => Ok(String::new()),
    }
}
