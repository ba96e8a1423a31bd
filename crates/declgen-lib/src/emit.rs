//! Declaration walker and ambient-declaration emitter.
//!
//! One walker, two driver configurations sharing one registry:
//!
//! - **Discovery** (pass 1): registers every declared type, produces no
//!   text. Runs over all input files before any emission so that forward
//!   references across files resolve.
//! - **Emission** (pass 2): re-walks each file and produces the nested
//!   ambient-module/interface/enum blocks, resolving every type reference
//!   through the mapper and the registry.
//!
//! Unrecognized node kinds are logged and skipped, never fatal.

use crate::ast::{DeclKind, Declaration};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::mapper::map_type;
use crate::registry::TypeRegistry;
use crate::utils::to_lower_camel;

const INDENT_WIDTH: usize = 3;

/// Declaration tree walker.
pub struct Emitter<'a> {
    registry: &'a mut TypeRegistry,
    diagnostics: &'a mut Diagnostics,
    /// Whether visited types are registered.
    discover: bool,
    /// Emission silence: the discovery pass produces no text.
    silent: bool,
    /// Echo emitted lines to stderr as they are produced.
    echo: bool,
    namespaces: Vec<String>,
    indent: usize,
    output: String,
}

impl<'a> Emitter<'a> {
    /// Pass-1 configuration: register types, emit nothing.
    pub fn discovery(registry: &'a mut TypeRegistry, diagnostics: &'a mut Diagnostics) -> Self {
        Self::new(registry, diagnostics, true, true)
    }

    /// Pass-2 configuration: emit text. `discover` registers types on the
    /// fly, used when the discovery pass was skipped.
    pub fn emission(
        registry: &'a mut TypeRegistry,
        diagnostics: &'a mut Diagnostics,
        discover: bool,
    ) -> Self {
        Self::new(registry, diagnostics, discover, false)
    }

    fn new(
        registry: &'a mut TypeRegistry,
        diagnostics: &'a mut Diagnostics,
        discover: bool,
        silent: bool,
    ) -> Self {
        Self {
            registry,
            diagnostics,
            discover,
            silent,
            echo: false,
            namespaces: Vec::new(),
            indent: 0,
            output: String::new(),
        }
    }

    /// Echo every emitted line to stderr (verbose mode).
    pub fn echo(mut self, value: bool) -> Self {
        self.echo = value;
        self
    }

    /// Walk a sequence of root declarations.
    pub fn process_all(&mut self, decls: &[Declaration]) {
        for decl in decls {
            self.process(decl);
        }
    }

    /// Walk one declaration. Single dispatch point over node kind.
    pub fn process(&mut self, decl: &Declaration) {
        match decl.kind {
            DeclKind::Namespace => self.process_namespace(decl),
            DeclKind::Enum => self.process_enum(decl),
            DeclKind::Class | DeclKind::Interface | DeclKind::Struct => self.process_type(decl),
            _ => self.diagnostics.report(
                DiagnosticKind::UnknownDeclKind,
                format!("unhandled declaration: {:?} {}", decl.kind, decl.identifier),
            ),
        }
    }

    /// Emitted text of the emission pass.
    pub fn into_output(self) -> String {
        self.output
    }

    fn namespace(&self) -> String {
        self.namespaces.join(".")
    }

    fn process_namespace(&mut self, decl: &Declaration) {
        if decl.members.is_empty() {
            return;
        }

        self.namespaces.push(decl.identifier.clone());

        let module = match self.registry.default_namespace() {
            Some(ns) => ns.to_string(),
            None => self.namespace(),
        };
        self.add_level(&format!("declare module {module}"));

        self.process_all(&decl.members);

        self.close_level();
        self.namespaces.pop();
    }

    fn process_enum(&mut self, decl: &Declaration) {
        if decl.members.is_empty() {
            return;
        }

        if self.is_excluded(decl) {
            self.register_excluded(decl);
            return;
        }

        self.register_discovered(decl);

        self.add_level(&format!("export enum {}", decl.identifier));

        // Host-language auto-increment: an explicit literal is emitted
        // verbatim and becomes the new baseline; implicit members continue
        // counting from it.
        let mut next: i64 = 0;
        let last = decl.members.len() - 1;
        for (idx, member) in decl.members.iter().enumerate() {
            let value = match &member.value {
                Some(literal) => {
                    next = literal
                        .trim()
                        .parse::<i64>()
                        .map_or(next, |v| v)
                        .saturating_add(1);
                    literal.clone()
                }
                None => {
                    let value = next.to_string();
                    next = next.saturating_add(1);
                    value
                }
            };
            let comma = if idx == last { "" } else { "," };
            self.add_line(&format!("{} = {}{}", member.identifier, value, comma));
        }

        self.close_level();
    }

    fn process_type(&mut self, decl: &Declaration) {
        if decl.members.is_empty() {
            return;
        }

        if self.is_excluded(decl) {
            self.register_excluded(decl);
            return;
        }

        // A non-excluded type with no emit-eligible members is skipped
        // without being registered: later references to it stay
        // permanently unresolvable and fall back to the unknown marker.
        if self.eligible_property_count(decl) == 0 {
            return;
        }

        self.register_discovered(decl);

        if !self.silent {
            let header = format!(
                "export interface {}{}{}",
                decl.identifier,
                decl.type_parameter_suffix(),
                self.extends_clause(decl),
            );
            self.add_level(&header);
        }

        for member in &decl.members {
            match member.kind {
                DeclKind::Property => self.process_property(member, decl.kind),
                DeclKind::Class => self.process_type(member),
                DeclKind::Field | DeclKind::Method | DeclKind::Constructor => {}
                _ => self.diagnostics.report(
                    DiagnosticKind::UnknownDeclKind,
                    format!("unhandled member: {:?} {}", member.kind, member.identifier),
                ),
            }
        }

        self.close_level();
    }

    /// `extends` clause from the declared base list. Bases mapping to the
    /// unknown marker are dropped; when all of them drop, there is no
    /// clause at all.
    fn extends_clause(&mut self, decl: &Declaration) -> String {
        let mut bases = Vec::new();
        for base in &decl.base_types {
            let mapped = map_type(base, self.registry, self.diagnostics);
            if !mapped.is_unknown() {
                bases.push(mapped.text);
            }
        }
        if bases.is_empty() {
            String::new()
        } else {
            format!(" extends {}", bases.join(","))
        }
    }

    fn process_property(&mut self, member: &Declaration, parent: DeclKind) {
        // Pass 1 never emits text.
        if self.silent {
            return;
        }

        if member.is_private()
            || member.is_internal()
            || self.registry.is_attribute_excluded(&member.attributes)
        {
            return;
        }

        // Classes default members to private, so only explicitly public
        // properties qualify. Interfaces and structs default to public.
        if parent == DeclKind::Class && !member.is_public() {
            return;
        }

        let Some(ty) = &member.ty else {
            self.diagnostics.report(
                DiagnosticKind::UnknownDeclKind,
                format!("property without a type: {}", member.identifier),
            );
            return;
        };

        let mapped = map_type(ty, self.registry, self.diagnostics);
        let optional = if mapped.optional { "?" } else { "" };
        self.add_line(&format!(
            "{}{} : {};",
            to_lower_camel(&member.identifier),
            optional,
            mapped.text
        ));
    }

    fn is_excluded(&self, decl: &Declaration) -> bool {
        self.registry.is_excluded(&decl.identifier)
            || self.registry.is_attribute_excluded(&decl.attributes)
    }

    fn register_discovered(&mut self, decl: &Declaration) {
        if !self.discover {
            return;
        }
        let namespace = self.namespace();
        self.registry.register_discovered(
            &namespace,
            &decl.identifier,
            &decl.type_parameter_suffix(),
            self.diagnostics,
        );
    }

    fn register_excluded(&mut self, decl: &Declaration) {
        if !self.discover {
            return;
        }
        let namespace = self.namespace();
        self.registry.register_excluded(
            &namespace,
            &decl.identifier,
            &decl.type_parameter_suffix(),
            self.diagnostics,
        );
    }

    /// Number of members a type declaration would emit, under the member
    /// visibility rules: classes require explicitly public properties,
    /// interfaces and structs accept any non-private, non-internal one.
    fn eligible_property_count(&self, decl: &Declaration) -> usize {
        let public_only = decl.kind == DeclKind::Class;
        decl.members
            .iter()
            .filter(|m| m.kind == DeclKind::Property)
            .filter(|m| !m.is_private() && !m.is_internal())
            .filter(|m| !self.registry.is_attribute_excluded(&m.attributes))
            .filter(|m| !public_only || m.is_public())
            .count()
    }

    fn indent_text(&self) -> String {
        " ".repeat(self.indent)
    }

    /// Emit `line {` and indent one level.
    fn add_level(&mut self, line: &str) {
        if self.silent {
            return;
        }
        let text = format!("{}{} {{", self.indent_text(), line);
        self.push_line(&text);
        self.indent += INDENT_WIDTH;
    }

    fn add_line(&mut self, line: &str) {
        if self.silent {
            return;
        }
        let text = format!("{}{}", self.indent_text(), line);
        self.push_line(&text);
    }

    /// Dedent, close the block, and leave a blank line after it.
    fn close_level(&mut self) {
        if self.silent {
            return;
        }
        self.indent = self.indent.saturating_sub(INDENT_WIDTH);
        let text = format!("{}}}", self.indent_text());
        self.push_line(&text);
        self.output.push('\n');
    }

    fn push_line(&mut self, text: &str) {
        if self.echo {
            eprintln!("{text}");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }
}
