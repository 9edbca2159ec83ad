use logos::Logos;


#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \n\r\t\f]+")] // Ignore this regex pattern between tokens
#[logos(skip r"#[^\n]*")] // Ignore this regex pattern between tokens
#[derive(Clone)]
pub enum Token {
    #[regex(r"true|false", |lex| {
        lex.slice() == "true"
    })]
    Bool(bool),

    #[regex(r"0|[1-9][0-9]*", |lex| {
        lex.slice().parse::<i64>().ok()
    }, priority = 3)]
    Int(i64),

    #[regex(r"[0-9]+\.[0-9]+", |lex| {
        lex.slice().parse::<f64>().ok()
    })]
    Float(f64),

    #[regex(r#""([^"\\]*(\\.[^"\\]*)*)""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1]
            .replace("\\\"", "\"")
            .replace("\\\\", "\\")
            .replace("\\n", "\n")
            .replace("\\r", "\r")
            .replace("\\t", "\t")
        // Removes quotes and handle escape sequences
    })]
    String(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex|{
        lex.slice().to_string()
    })]
    Ident(String),

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token("->")]
    Arrow,

    #[token(".")]
    Dot,

    #[token("-")]
    Minus,

    #[token("=")]
    Assign,

    #[token("namespace")]
    KeywordNamespace,

    #[token("struct")]
    KeywordStruct,

    #[token("constants")]
    KeywordConstants,

    #[token("template")]
    KeywordTemplate,

    #[token("use")]
    KeywordUse,

    #[token("as")]
    KeywordAs,

    #[token("def")]
    KeywordDef,

    #[token("contains")]
    KeywordContains,

    #[token("end")]
    KeywordEnd,
}
