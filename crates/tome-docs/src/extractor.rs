use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Comment, Declaration, ExportNamedDeclaration, ModuleExportName, PropertyKey, Statement,
    TSInterfaceDeclaration, TSSignature, TSType, TSTypeAliasDeclaration,
};
use oxc_parser::{Parser, ParserReturn};
use oxc_span::{GetSpan, SourceType, Span};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{DocsError, Result};
use crate::filter::{is_boilerplate_parent, should_keep_prop, supports_style_props};
use crate::jsdoc::parse_jsdoc;
use crate::model::{ComponentTypeDoc, PropDoc, is_pascal_case};

/// Options controlling type extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Include props annotated with `@internal`.
    pub include_internal: bool,
}

/// Extracts component prop signatures from a TypeScript entry module.
///
/// The entry is parsed with OXC and relative re-exports are followed
/// transitively. Relative imports are parsed too, but only contribute type
/// declarations so that props inherited across files resolve.
#[derive(Debug, Clone, Default)]
pub struct TypeExtractor {
    options: ExtractOptions,
}

impl TypeExtractor {
    /// Create a new extractor with the provided options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extract every component reachable from `entry`.
    ///
    /// Any module that fails to parse fails the whole extraction.
    pub async fn extract(&self, entry: impl AsRef<Path>) -> Result<Vec<ComponentTypeDoc>> {
        let entry = path_clean::clean(entry.as_ref());
        let mut graph = ModuleGraph::default();
        let mut queue = VecDeque::from([entry.clone()]);

        while let Some(path) = queue.pop_front() {
            if graph.modules.contains_key(&path) {
                continue;
            }
            let source = tokio::fs::read_to_string(&path)
                .await
                .map_err(|error| DocsError::Io {
                    path: path.clone(),
                    error,
                })?;
            let summary = summarize_module(&path, &source, &self.options)?;
            tracing::trace!("Summarized module {}", path.display());
            queue.extend(summary.dependencies(&path));
            graph.insert(path, summary);
        }

        let components = graph.components(&entry);
        tracing::debug!(
            modules = graph.modules.len(),
            components = components.len(),
            "Extracted component types from {}",
            entry.display()
        );
        Ok(components)
    }

    /// Extract components from a single in-memory module.
    ///
    /// Re-exports are not followed; this is mainly useful for tests and for
    /// entry modules that declare everything inline.
    pub fn extract_from_source(
        &self,
        path: impl AsRef<Path>,
        source: &str,
    ) -> Result<Vec<ComponentTypeDoc>> {
        let path = path_clean::clean(path.as_ref());
        let summary = summarize_module(&path, source, &self.options)?;
        let mut graph = ModuleGraph::default();
        graph.insert(path.clone(), summary);
        Ok(graph.components(&path))
    }
}

/// A prop as declared, before filtering.
#[derive(Debug, Clone)]
struct RawProp {
    name: String,
    type_name: String,
    optional: bool,
    description: Option<String>,
    default_value: Option<String>,
}

/// An interface or object type alias.
#[derive(Debug, Clone, Default)]
struct TypeDecl {
    parents: Vec<String>,
    props: Vec<RawProp>,
}

/// Everything the extractor needs from one module, detached from the AST arena.
#[derive(Debug, Default)]
struct ModuleSummary {
    /// Exported value names (functions, classes, variables)
    values: Vec<String>,
    star_exports: Vec<String>,
    /// `export { local as exported } from '...'`
    named_exports: Vec<(String, Vec<(String, String)>)>,
    imports: Vec<String>,
    types: Vec<(String, TypeDecl)>,
}

impl ModuleSummary {
    fn dependencies(&self, from: &Path) -> Vec<PathBuf> {
        self.star_exports
            .iter()
            .chain(self.named_exports.iter().map(|(spec, _)| spec))
            .chain(self.imports.iter())
            .filter_map(|spec| resolve_relative(from, spec))
            .collect()
    }
}

#[derive(Debug, Default)]
struct ModuleGraph {
    modules: FxHashMap<PathBuf, ModuleSummary>,
    /// First declaration wins when two modules declare the same type name.
    types: FxHashMap<String, TypeDecl>,
}

impl ModuleGraph {
    fn insert(&mut self, path: PathBuf, summary: ModuleSummary) {
        for (name, decl) in &summary.types {
            self.types
                .entry(name.clone())
                .or_insert_with(|| decl.clone());
        }
        self.modules.insert(path, summary);
    }

    fn components(&self, entry: &Path) -> Vec<ComponentTypeDoc> {
        let base = entry.parent().unwrap_or_else(|| Path::new(""));
        let mut visiting = FxHashSet::default();
        let mut exported = Vec::new();
        self.exported_values(entry, &mut visiting, &mut exported);

        let mut components: BTreeMap<String, ComponentTypeDoc> = BTreeMap::new();
        for (name, module) in exported {
            if !is_pascal_case(&name) || components.contains_key(&name) {
                continue;
            }
            let props_type = format!("{}Props", name);
            if !self.types.contains_key(&props_type) {
                continue;
            }

            let props = self.resolve_props(&props_type);
            let supports_style_props = supports_style_props(props.keys().map(String::as_str));
            let file_path = module
                .strip_prefix(base)
                .unwrap_or(&module)
                .to_string_lossy()
                .replace('\\', "/");

            let doc = ComponentTypeDoc {
                display_name: name.clone(),
                file_path,
                props,
                supports_style_props,
            };
            if doc.is_component_like() {
                components.insert(name, doc);
            }
        }

        components.into_values().collect()
    }

    /// Exported value names of `path` paired with the module declaring them.
    fn exported_values(
        &self,
        path: &Path,
        visiting: &mut FxHashSet<PathBuf>,
        out: &mut Vec<(String, PathBuf)>,
    ) {
        if !visiting.insert(path.to_path_buf()) {
            return;
        }
        let Some(module) = self.modules.get(path) else {
            return;
        };

        for value in &module.values {
            out.push((value.clone(), path.to_path_buf()));
        }

        for spec in &module.star_exports {
            if let Some(target) = resolve_relative(path, spec) {
                let mut nested = Vec::new();
                self.exported_values(&target, visiting, &mut nested);
                out.extend(nested.into_iter().filter(|(name, _)| name != "default"));
            }
        }

        for (spec, names) in &module.named_exports {
            let Some(target) = resolve_relative(path, spec) else {
                continue;
            };
            let mut nested = Vec::new();
            self.exported_values(&target, visiting, &mut nested);
            for (local, exported) in names {
                if let Some((_, declared_in)) = nested.iter().find(|(name, _)| name == local) {
                    out.push((exported.clone(), declared_in.clone()));
                }
            }
        }

        visiting.remove(path);
    }

    /// Collect the filtered props of `type_name` and everything it inherits.
    fn resolve_props(&self, type_name: &str) -> BTreeMap<String, PropDoc> {
        let mut collected: BTreeMap<String, (RawProp, String)> = BTreeMap::new();
        let mut visited = FxHashSet::default();
        self.collect_props(type_name, &mut visited, &mut collected);

        collected
            .into_iter()
            .filter(|(name, (_, parent))| should_keep_prop(name, parent))
            .map(|(name, (raw, _))| {
                let doc = PropDoc {
                    type_name: raw.type_name,
                    required: !raw.optional,
                    description: raw.description.unwrap_or_default(),
                    default_value: raw.default_value,
                };
                (name, doc)
            })
            .collect()
    }

    fn collect_props(
        &self,
        type_name: &str,
        visited: &mut FxHashSet<String>,
        out: &mut BTreeMap<String, (RawProp, String)>,
    ) {
        if is_boilerplate_parent(type_name) || !visited.insert(type_name.to_string()) {
            return;
        }
        let Some(decl) = self.types.get(type_name) else {
            return;
        };

        // Own props first so they shadow anything inherited.
        for prop in &decl.props {
            out.entry(prop.name.clone())
                .or_insert_with(|| (prop.clone(), type_name.to_string()));
        }
        for parent in &decl.parents {
            self.collect_props(parent, visited, out);
        }
    }
}

fn summarize_module(path: &Path, source: &str, options: &ExtractOptions) -> Result<ModuleSummary> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(path).unwrap_or(SourceType::tsx());
    let ParserReturn {
        program, errors, ..
    } = Parser::new(&allocator, source, source_type).parse();

    if !errors.is_empty() {
        let diagnostics: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(DocsError::parse_error(path.to_path_buf(), &diagnostics));
    }

    let collector = Collector {
        source,
        comments: build_comment_map(program.comments.iter()),
        options,
    };

    let mut summary = ModuleSummary::default();
    let mut local_values: FxHashSet<String> = FxHashSet::default();
    let mut local_exports: Vec<(String, String)> = Vec::new();

    for statement in program.body.iter() {
        match statement {
            Statement::ImportDeclaration(import) => {
                summary.imports.push(import.source.value.to_string());
            }
            Statement::ExportAllDeclaration(export) => {
                // `export * as ns from` exposes a namespace, not components
                if export.exported.is_none() {
                    summary.star_exports.push(export.source.value.to_string());
                }
            }
            Statement::ExportNamedDeclaration(export) => {
                collector.export_named(export, &mut summary, &mut local_exports);
            }
            Statement::TSInterfaceDeclaration(interface) => {
                summary.types.push(collector.interface(interface));
            }
            Statement::TSTypeAliasDeclaration(alias) => {
                if let Some(decl) = collector.type_alias(alias) {
                    summary.types.push(decl);
                }
            }
            Statement::FunctionDeclaration(function) => {
                if let Some(id) = &function.id {
                    local_values.insert(id.name.to_string());
                }
            }
            Statement::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    local_values.insert(id.name.to_string());
                }
            }
            Statement::VariableDeclaration(variable) => {
                for declarator in variable.declarations.iter() {
                    if let Some(name) = binding_name(&declarator.id) {
                        local_values.insert(name);
                    }
                }
            }
            _ => {}
        }
    }

    // `export { Button }` after a local declaration
    for (local, exported) in local_exports {
        if local_values.contains(&local) {
            summary.values.push(exported);
        }
    }

    Ok(summary)
}

type CommentMap<'a> = FxHashMap<u32, &'a Comment>;

fn build_comment_map<'a, I>(comments: I) -> CommentMap<'a>
where
    I: IntoIterator<Item = &'a Comment>,
{
    let mut map = CommentMap::default();
    for comment in comments {
        if comment.is_jsdoc() {
            map.insert(comment.attached_to, comment);
        }
    }
    map
}

struct Collector<'s, 'c> {
    source: &'s str,
    comments: CommentMap<'c>,
    options: &'s ExtractOptions,
}

impl Collector<'_, '_> {
    fn export_named(
        &self,
        export: &ExportNamedDeclaration,
        summary: &mut ModuleSummary,
        local_exports: &mut Vec<(String, String)>,
    ) {
        if let Some(source) = &export.source {
            let names = export
                .specifiers
                .iter()
                .map(|spec| (export_name(&spec.local), export_name(&spec.exported)))
                .collect();
            summary
                .named_exports
                .push((source.value.to_string(), names));
            return;
        }

        for spec in export.specifiers.iter() {
            local_exports.push((export_name(&spec.local), export_name(&spec.exported)));
        }

        let Some(declaration) = &export.declaration else {
            return;
        };
        match declaration {
            Declaration::FunctionDeclaration(function) => {
                if let Some(id) = &function.id {
                    summary.values.push(id.name.to_string());
                }
            }
            Declaration::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    summary.values.push(id.name.to_string());
                }
            }
            Declaration::VariableDeclaration(variable) => {
                for declarator in variable.declarations.iter() {
                    if let Some(name) = binding_name(&declarator.id) {
                        summary.values.push(name);
                    }
                }
            }
            Declaration::TSInterfaceDeclaration(interface) => {
                summary.types.push(self.interface(interface));
            }
            Declaration::TSTypeAliasDeclaration(alias) => {
                if let Some(decl) = self.type_alias(alias) {
                    summary.types.push(decl);
                }
            }
            _ => {}
        }
    }

    fn interface(&self, interface: &TSInterfaceDeclaration) -> (String, TypeDecl) {
        let mut decl = TypeDecl::default();
        for heritage in interface.extends.iter() {
            decl.parents
                .push(last_segment(self.slice(heritage.expression.span())));
        }
        for signature in interface.body.body.iter() {
            if let Some(prop) = self.signature(signature) {
                decl.props.push(prop);
            }
        }
        (interface.id.name.to_string(), decl)
    }

    /// Object-like aliases only: literals, intersections and references.
    fn type_alias(&self, alias: &TSTypeAliasDeclaration) -> Option<(String, TypeDecl)> {
        let mut decl = TypeDecl::default();
        if !self.walk_type(&alias.type_annotation, &mut decl) {
            return None;
        }
        Some((alias.id.name.to_string(), decl))
    }

    fn walk_type(&self, ty: &TSType, decl: &mut TypeDecl) -> bool {
        match ty {
            TSType::TSTypeLiteral(literal) => {
                for signature in literal.members.iter() {
                    if let Some(prop) = self.signature(signature) {
                        decl.props.push(prop);
                    }
                }
                true
            }
            TSType::TSIntersectionType(intersection) => {
                let mut any = false;
                for member in intersection.types.iter() {
                    any |= self.walk_type(member, decl);
                }
                any
            }
            TSType::TSTypeReference(reference) => {
                decl.parents
                    .push(last_segment(self.slice(reference.type_name.span())));
                true
            }
            TSType::TSParenthesizedType(inner) => self.walk_type(&inner.type_annotation, decl),
            _ => false,
        }
    }

    fn signature(&self, signature: &TSSignature) -> Option<RawProp> {
        let (name, type_name, optional, start) = match signature {
            TSSignature::TSPropertySignature(prop) => {
                let name = property_key_name(&prop.key)?;
                let type_name = prop
                    .type_annotation
                    .as_ref()
                    .map(|annotation| self.slice(annotation.type_annotation.span()).trim())
                    .unwrap_or("any")
                    .to_string();
                (name, type_name, prop.optional, prop.span.start)
            }
            TSSignature::TSMethodSignature(method) => {
                let name = property_key_name(&method.key)?;
                let rest = self.slice(Span::new(method.key.span().end, method.span.end));
                let type_name = rest.trim().trim_start_matches('?').trim().to_string();
                (name, type_name, method.optional, method.span.start)
            }
            _ => return None,
        };

        let doc = self
            .comments
            .get(&start)
            .map(|comment| parse_jsdoc(self.slice(comment.content_span())));
        if doc
            .as_ref()
            .is_some_and(|doc| doc.is_internal && !self.options.include_internal)
        {
            return None;
        }

        Some(RawProp {
            name,
            type_name,
            optional,
            description: doc.as_ref().and_then(|doc| doc.summary.clone()),
            default_value: doc.as_ref().and_then(|doc| doc.default_value()),
        })
    }

    fn slice(&self, span: Span) -> &str {
        let start = span.start as usize;
        let end = (span.end as usize).min(self.source.len());
        self.source.get(start..end).unwrap_or("")
    }
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

fn property_key_name(key: &PropertyKey) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.to_string()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

fn binding_name(pattern: &oxc_ast::ast::BindingPattern) -> Option<String> {
    match &pattern.kind {
        oxc_ast::ast::BindingPatternKind::BindingIdentifier(ident) => Some(ident.name.to_string()),
        _ => None,
    }
}

/// `React.HTMLAttributes<T>` -> `HTMLAttributes`
fn last_segment(text: &str) -> String {
    let head = text.split('<').next().unwrap_or(text).trim();
    head.rsplit('.').next().unwrap_or(head).trim().to_string()
}

/// Resolve a relative module specifier against the importing file.
///
/// Bare specifiers (packages) are never followed. Candidates are tried in
/// order: as written, `.tsx`, `.ts`, `/index.tsx`, `/index.ts`; a `.js`
/// suffix is also tried as its TypeScript source.
pub fn resolve_relative(from: &Path, specifier: &str) -> Option<PathBuf> {
    if !specifier.starts_with("./") && !specifier.starts_with("../") {
        return None;
    }
    let dir = from.parent().unwrap_or_else(|| Path::new(""));
    let base = path_clean::clean(dir.join(specifier));
    let base_str = base.to_string_lossy().to_string();

    let mut candidates = vec![
        base.clone(),
        PathBuf::from(format!("{}.tsx", base_str)),
        PathBuf::from(format!("{}.ts", base_str)),
        base.join("index.tsx"),
        base.join("index.ts"),
    ];
    if let Some(stem) = base_str.strip_suffix(".js") {
        candidates.push(PathBuf::from(format!("{}.tsx", stem)));
        candidates.push(PathBuf::from(format!("{}.ts", stem)));
    }

    candidates.into_iter().find(|candidate| candidate.is_file())
}
