//! The marker attribute definition shipped alongside generated code.

use crate::artifact::SourceArtifact;
use crate::emit::write_preamble;
use crate::writer::SourceWriter;

/// Hint name of the attribute artifact.
pub const ATTRIBUTE_HINT_NAME: &str = "EnumExtensionsAttribute.g.cs";

/// Source of the marker attribute class for a fully-qualified marker name
/// such as `EnumGenerators.EnumExtensionsAttribute`.
pub fn attribute_source(marker: &str) -> String {
    let (namespace, class) = match marker.rsplit_once('.') {
        Some((ns, class)) => (Some(ns), class),
        None => (None, marker),
    };

    let mut w = SourceWriter::new();
    write_preamble(&mut w);
    if let Some(ns) = namespace {
        w.open(&format!("namespace {ns}"));
    }
    w.line("/// <summary>");
    w.line("/// Add to enums to indicate that extension methods should be generated for the type.");
    w.line("/// </summary>");
    w.line("[global::System.AttributeUsage(global::System.AttributeTargets.Enum)]");
    w.open(&format!("public class {class} : global::System.Attribute"));
    w.line("/// <summary>");
    w.line("/// The namespace to generate the extension class in.");
    w.line("/// If not provided, the namespace of the enum is used.");
    w.line("/// </summary>");
    w.line("public string? ExtensionClassNamespace { get; set; }");
    w.blank();
    w.line("/// <summary>");
    w.line("/// The name to use for the extension class.");
    w.line("/// If not provided, the enum name followed by \"Extensions\" is used.");
    w.line("/// </summary>");
    w.line("public string? ExtensionClassName { get; set; }");
    w.close();
    if namespace.is_some() {
        w.close();
    }
    w.finish()
}

/// The attribute artifact for a marker name.
pub fn attribute_artifact(marker: &str) -> SourceArtifact {
    SourceArtifact::new(ATTRIBUTE_HINT_NAME, attribute_source(marker))
}
