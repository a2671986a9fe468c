#[derive(Debug, PartialEq)]
pub enum Token {
    Root(RootPathToken),
    Property(PropertyPathToken),
    ArrayIndex(ArrayIndexPathToken),
}

#[derive(Debug, PartialEq)]
pub struct RootPathToken {
    pub root_path_char: char,
}

#[derive(Debug, PartialEq)]
pub struct PropertyPathToken {
    pub name: String,
}

#[derive(Debug, PartialEq)]
pub struct ArrayIndexPathToken {
    pub index: i64,
}
