//! Exported arrow function builder.

use specgen_codegen::builder::CodeBuilder;

/// A function parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: Option<String>,
    pub default: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            default: None,
        }
    }

    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// Default value, making the parameter optional at call sites.
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn render(&self) -> String {
        let mut out = self.name.clone();
        if let Some(ty) = &self.ty {
            out.push_str(": ");
            out.push_str(ty);
        }
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(default);
        }
        out
    }
}

/// `export const name = (params): Returns =>` followed by an indented
/// expression body.
#[derive(Debug, Clone)]
pub struct ArrowFn {
    name: String,
    doc: Vec<String>,
    params: Vec<Param>,
    returns: Option<String>,
    body: String,
}

impl ArrowFn {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: Vec::new(),
            params: Vec::new(),
            returns: None,
            body: body.into(),
        }
    }

    pub fn doc(mut self, lines: Vec<String>) -> Self {
        self.doc = lines;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let params: Vec<_> = self.params.iter().map(Param::render).collect();
        let returns = self
            .returns
            .as_ref()
            .map(|ty| format!(": {ty}"))
            .unwrap_or_default();
        builder
            .jsdoc(&self.doc)
            .line(&format!(
                "export const {} = ({}){returns} =>",
                self.name,
                params.join(", ")
            ))
            .indent()
            .line(&format!("{};", self.body))
            .dedent()
    }

    pub fn build(&self) -> String {
        self.render(CodeBuilder::typescript()).build()
    }
}
