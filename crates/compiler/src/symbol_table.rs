use evmc_ast::SourceFile;
use evmc_types::{EvmType, TypeContext};
use std::collections::{BTreeSet, HashMap};

/// Resolves enum and struct names declared at the top of a source file.
///
/// Built once, before any type spelling is parsed, so that a field typed
/// `Color` or `Point` resolves to [`EvmType::Enum`]/[`EvmType::Struct`]
/// rather than an "unknown type" error.
#[derive(Debug, Default)]
pub struct SymbolTable {
    enums: BTreeSet<String>,
    structs: HashMap<String, Vec<(String, String)>>,
}

impl SymbolTable {
    /// Builds a symbol table from a source file's top-level enum and
    /// struct declarations.
    pub fn from_source(source: &SourceFile) -> Self {
        let mut enums = BTreeSet::new();
        for decl in &source.enums {
            enums.insert(decl.name.clone());
        }
        let mut structs = HashMap::new();
        for decl in &source.structs {
            structs.insert(decl.name.clone(), decl.fields.clone());
        }
        Self { enums, structs }
    }

    /// Returns the declared field list of a struct, if `name` names one.
    pub fn struct_fields(&self, name: &str) -> Option<&[(String, String)]> {
        self.structs.get(name).map(Vec::as_slice)
    }

    /// Every declared enum name, in sorted order.
    pub fn enum_names(&self) -> &BTreeSet<String> {
        &self.enums
    }

    /// Every declared struct name.
    pub fn struct_names(&self) -> impl Iterator<Item = &String> {
        self.structs.keys()
    }
}

impl TypeContext for SymbolTable {
    fn is_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    fn get_struct_type(&self, name: &str) -> Option<EvmType> {
        self.structs.contains_key(name).then(|| EvmType::Struct(name.to_owned()))
    }
}
