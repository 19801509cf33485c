mod alias_preprocessor;
mod graph_to_tree;
mod npm_alias_preprocessor;
mod tree_differ;
mod tree_text_parser;
mod yarn_alias_preprocessor;

pub use alias_preprocessor::{
    AliasPreprocessor, AliasRewrite, PreprocessedLockfile, NPM_ALIAS_PREFIX,
};
pub use graph_to_tree::{ConvertOptions, GraphToTreeConverter};
pub use npm_alias_preprocessor::NpmAliasPreprocessor;
pub use tree_differ::TreeDiffer;
pub use tree_text_parser::TreeTextParser;
pub use yarn_alias_preprocessor::YarnAliasPreprocessor;
