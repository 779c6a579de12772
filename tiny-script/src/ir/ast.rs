use std::mem;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Binding, e.g. `let x = 5`. The grammar reserves it but the parser
    /// does not produce it yet.
    Declaration {
        name: String,
        value: Expression,
    },
    /// `print x + "!"`
    Print(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// 5, 42
    Number(f64),
    /// "hello"
    String(String),
    /// A reference to a name, unresolved
    Variable(String),
    /// a + b
    Addition {
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn addition(left: Expression, right: Expression) -> Self {
        Self::Addition {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

// The derived drop would recurse once per nesting level, which overflows the
// stack on long `+` chains.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();

        if let Expression::Addition { left, right } = self {
            pending.push(mem::replace(left.as_mut(), Expression::Number(0.0)));
            pending.push(mem::replace(right.as_mut(), Expression::Number(0.0)));
        }

        while let Some(mut expression) = pending.pop() {
            if let Expression::Addition { left, right } = &mut expression {
                pending.push(mem::replace(left.as_mut(), Expression::Number(0.0)));
                pending.push(mem::replace(right.as_mut(), Expression::Number(0.0)));
            }
            // `expression` now only holds leaves, so dropping it is shallow
        }
    }
}
