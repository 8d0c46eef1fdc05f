//! Low-level GLSL text emitter
//!
//! [`ShaderEmitter`] owns a growable text buffer and a stack of open lexical
//! scopes. Every non-raw line is prefixed with one tab per open scope, so
//! structured output (structs, functions, control flow) stays correctly
//! indented and brace-balanced by construction.
//!
//! One emitter serves exactly one generation pass: create it, append, read
//! the result with [`ShaderEmitter::build`], drop it. Ownership (`&mut self`
//! methods on an owned value) rules out cross-call reuse.

use crate::error::ShaderGenError;

// ============================================================================
// Profile and Scope Tags
// ============================================================================

/// OpenGL profile token used in the `#version` directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlslProfile {
    /// Core profile (`#version 330 core`)
    #[default]
    Core,
    /// Compatibility profile (no profile token after the version number)
    Compatibility,
}

impl GlslProfile {
    /// Token appended after the version number in the `#version` directive
    pub const fn token(self) -> &'static str {
        match self {
            GlslProfile::Core => "core",
            GlslProfile::Compatibility => "",
        }
    }
}

/// Kind of lexical scope currently open in the emitter
///
/// Recorded at open time so the single generic [`ShaderEmitter::close_scope`]
/// can emit the right closing line (`};` for structs, `}` for everything
/// else) without per-construct close methods drifting apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Struct,
    Function,
    If,
    While,
    For,
}

impl ScopeKind {
    const fn closer(self) -> &'static str {
        match self {
            ScopeKind::Struct => "};",
            _ => "}",
        }
    }
}

// ============================================================================
// Emitter
// ============================================================================

/// GLSL source emitter with automatic indentation and scope tracking
///
/// Scope depth equals the number of open scopes. Opening operations write
/// their header line at the pre-push depth, then push one tag; closing
/// operations pop one tag before writing the closing line, so closers line up
/// with their openers. Closing with no open scope fails with
/// [`ShaderGenError::ScopeUnderflow`] and appends nothing; if-continuations
/// additionally require the innermost scope to be an if and fail with
/// [`ShaderGenError::ScopeMismatch`] otherwise.
#[derive(Debug, Default)]
pub struct ShaderEmitter {
    source: String,
    scopes: Vec<ScopeKind>,
}

impl ShaderEmitter {
    /// Creates a completely empty emitter, without a version directive
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an emitter whose buffer opens with a `#version` directive
    pub fn with_version(version: u32, profile: GlslProfile) -> Self {
        let mut emitter = Self::new();
        let token = profile.token();
        if token.is_empty() {
            emitter.source.push_str(&format!("#version {version}\n"));
        } else {
            emitter
                .source
                .push_str(&format!("#version {version} {token}\n"));
        }
        emitter
    }

    /// Current scope depth (number of open scopes)
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Returns the accumulated source text
    ///
    /// Read-only; callable any number of times without side effects.
    pub fn build(&self) -> String {
        self.source.clone()
    }

    fn push_indent(&mut self) {
        for _ in 0..self.scopes.len() {
            self.source.push('\t');
        }
    }

    fn line(&mut self, text: &str) {
        self.push_indent();
        self.source.push_str(text);
        self.source.push('\n');
    }

    fn open(&mut self, header: &str, kind: ScopeKind) {
        self.line(header);
        self.scopes.push(kind);
    }

    // ========================================================================
    // Preprocessor
    // ========================================================================

    /// Adds an `#extension` declaration; preprocessor lines ignore indentation
    pub fn add_extension(&mut self, name: &str, behavior: &str) {
        self.source
            .push_str(&format!("#extension {name} : {behavior}\n"));
    }

    /// Adds a preprocessor directive (the text between `#` and the line break)
    pub fn add_directive(&mut self, directive: &str) {
        self.source.push_str(&format!("#{directive}\n"));
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Declares a variable with optional qualifier and optional initializer
    pub fn declare(&mut self, qualifier: Option<&str>, ty: &str, name: &str, init: Option<&str>) {
        let mut decl = String::new();
        if let Some(qualifier) = qualifier {
            decl.push_str(qualifier);
            decl.push(' ');
        }
        decl.push_str(ty);
        decl.push(' ');
        decl.push_str(name);
        if let Some(init) = init {
            decl.push_str(" = ");
            decl.push_str(init);
        }
        decl.push(';');
        self.line(&decl);
    }

    /// Declares a bare variable (`<ty> <name>;`)
    pub fn declare_var(&mut self, ty: &str, name: &str) {
        self.declare(None, ty, name, None);
    }

    /// Declares a qualified variable (`<qualifier> <ty> <name>;`)
    pub fn declare_qualified(&mut self, qualifier: &str, ty: &str, name: &str) {
        self.declare(Some(qualifier), ty, name, None);
    }

    /// Declares an initialized variable (`<ty> <name> = <init>;`)
    pub fn declare_init(&mut self, ty: &str, name: &str, init: &str) {
        self.declare(None, ty, name, Some(init));
    }

    /// Declares a layout-qualified input/output at the given location
    pub fn declare_layout(&mut self, location: u32, qualifier: &str, ty: &str, name: &str) {
        self.line(&format!(
            "layout (location = {location}) {qualifier} {ty} {name};"
        ));
    }

    // ========================================================================
    // Scopes
    // ========================================================================

    /// Opens a `struct <name> {` scope; close with [`close_scope`](Self::close_scope)
    pub fn open_struct(&mut self, name: &str) {
        self.open(&format!("struct {name} {{"), ScopeKind::Struct);
    }

    /// Opens a function scope; close with [`close_scope`](Self::close_scope)
    pub fn open_function(&mut self, return_type: &str, name: &str, args: &str) {
        self.open(
            &format!("{return_type} {name}({args}) {{"),
            ScopeKind::Function,
        );
    }

    /// Opens the `void main()` function scope
    pub fn open_main(&mut self) {
        self.open_function("void", "main", "");
    }

    /// Opens an `if (<condition>) {` scope
    pub fn open_if(&mut self, condition: &str) {
        self.open(&format!("if ({condition}) {{"), ScopeKind::If);
    }

    /// Pops the innermost scope, requiring it to be an if scope
    fn pop_if(&mut self) -> Result<(), ShaderGenError> {
        match self.scopes.last() {
            Some(ScopeKind::If) => {
                self.scopes.pop();
                Ok(())
            }
            Some(&found) => Err(ShaderGenError::ScopeMismatch { found }),
            None => Err(ShaderGenError::ScopeUnderflow),
        }
    }

    /// Continues an open if scope with `} else if (<condition>) {`
    ///
    /// Net depth is unchanged: the branch closes at the opener's depth and
    /// immediately reopens. Fails if the innermost open scope is not an if.
    pub fn else_if(&mut self, condition: &str) -> Result<(), ShaderGenError> {
        self.pop_if()?;
        self.line(&format!("}} else if ({condition}) {{"));
        self.scopes.push(ScopeKind::If);
        Ok(())
    }

    /// Closes an if scope, optionally opening an `else` block in its place
    ///
    /// Fails if the innermost open scope is not an if.
    pub fn close_if(&mut self, use_else: bool) -> Result<(), ShaderGenError> {
        self.pop_if()?;
        if use_else {
            self.line("} else {");
            self.scopes.push(ScopeKind::If);
        } else {
            self.line("}");
        }
        Ok(())
    }

    /// Opens a `while (<condition>) {` scope
    pub fn open_while(&mut self, condition: &str) {
        self.open(&format!("while ({condition}) {{"), ScopeKind::While);
    }

    /// Opens a `for (<header>) {` scope
    pub fn open_for(&mut self, header: &str) {
        self.open(&format!("for ({header}) {{"), ScopeKind::For);
    }

    /// Closes the innermost open scope
    ///
    /// The one generic closer for struct, function, while, and for scopes;
    /// the recorded [`ScopeKind`] picks `};` or `}`.
    pub fn close_scope(&mut self) -> Result<(), ShaderGenError> {
        let kind = self.scopes.pop().ok_or(ShaderGenError::ScopeUnderflow)?;
        self.line(kind.closer());
        Ok(())
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Invokes a function as a standalone statement (`<name>(<args>);`)
    pub fn call_function(&mut self, name: &str, args: &str) {
        self.line(&format!("{name}({args});"));
    }

    /// Invokes a function as an inline expression fragment (`<name>(<args>)`)
    ///
    /// No indentation, terminator, or line break is emitted.
    pub fn call_function_inline(&mut self, name: &str, args: &str) {
        self.source.push_str(&format!("{name}({args})"));
    }

    /// Emits a bare statement keyword (`discard;`, `break;`)
    pub fn statement(&mut self, keyword: &str) {
        self.line(&format!("{keyword};"));
    }

    /// Emits a statement keyword with a trailing expression (`return x;`)
    pub fn statement_with(&mut self, keyword: &str, expr: &str) {
        self.line(&format!("{keyword} {expr};"));
    }

    // ========================================================================
    // Raw text
    // ========================================================================

    /// Appends a line of custom code at the current indentation
    pub fn add_code(&mut self, code: &str) {
        self.line(code);
    }

    /// Appends custom code, optionally skipping indentation or the line break
    pub fn add_code_raw(&mut self, code: &str, ignore_indent: bool, line_break: bool) {
        if !ignore_indent {
            self.push_indent();
        }
        self.source.push_str(code);
        if line_break {
            self.source.push('\n');
        }
    }

    /// Appends a `// <text>` comment line
    pub fn comment(&mut self, text: &str) {
        self.line(&format!("// {text}"));
    }

    /// Appends an empty line
    pub fn blank_line(&mut self) {
        self.source.push('\n');
    }
}

// ============================================================================
// Tests
// ============================================================================
