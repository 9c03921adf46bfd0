//! Type resolver
//!
//! Looks names up in a [`Namespace`] and follows alias declarations down to
//! the structural shape they stand for. Resolution is a pure lookup: the
//! namespace is never modified.

use super::error::{GenError, GenResult};
use super::schema::{Contract, Decl, Namespace, StructDecl, TypeExpr, TypePath};

/// Structural description of one record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSchema {
    pub name: String,
    pub tuple: bool,
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub member: String,
    pub ty: TypeExpr,
    /// Declared as `Option<_>`, directly or through an alias
    pub optional: bool,
    /// Excluded from the wire format
    pub skip: bool,
}

/// Non-generic alias target that could name a namespace item
fn alias_target(ty: &TypeExpr) -> Option<&str> {
    ty.as_path()
        .filter(|p| p.args.is_empty())
        .and_then(TypePath::local_name)
}

pub struct Resolver<'ns> {
    ns: &'ns Namespace,
}

impl<'ns> Resolver<'ns> {
    #[must_use]
    pub fn new(ns: &'ns Namespace) -> Self {
        Self { ns }
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'ns Decl> {
        self.ns.lookup(name)
    }

    #[must_use]
    pub fn contract(&self, name: &str) -> Contract {
        self.ns.contract(name)
    }

    /// Resolves the record a generation request is made for.
    ///
    /// # Errors
    ///
    /// `UnknownType` when `name` is not declared, `NotAStruct` when it (or
    /// the end of its alias chain) is anything but a non-generic struct, and
    /// `RecursiveSchema` for an alias chain that loops.
    pub fn resolve(&self, name: &str) -> GenResult<TypeSchema> {
        let not_a_struct = |found: String| GenError::NotAStruct {
            name: name.to_owned(),
            found,
        };
        let mut chain = vec![name.to_owned()];
        loop {
            let current = chain.last().map_or(name, String::as_str);
            let decl = match self.ns.lookup(current) {
                Some(decl) => decl,
                None if chain.len() == 1 => {
                    return Err(GenError::UnknownType {
                        name: name.to_owned(),
                    })
                }
                None => return Err(not_a_struct(format!("alias of `{current}`"))),
            };
            match decl {
                Decl::Struct(s) if s.generic => {
                    return Err(not_a_struct("generic struct".to_owned()))
                }
                Decl::Struct(s) => return self.schema_of(s),
                Decl::Alias(target) => {
                    let Some(next) = alias_target(target) else {
                        return Err(not_a_struct(format!("alias of `{target}`")));
                    };
                    let looped = chain.iter().any(|n| n == next);
                    chain.push(next.to_owned());
                    if looped {
                        return Err(GenError::RecursiveSchema { path: chain });
                    }
                }
                Decl::Other(kind) => return Err(not_a_struct((*kind).to_owned())),
            }
        }
    }

    /// Follows namespace aliases from `ty` until reaching a type that is not
    /// an alias, or that declares its own contract.
    pub fn follow_aliases(&self, ty: &TypeExpr) -> GenResult<TypeExpr> {
        let mut current = ty.clone();
        let mut chain: Vec<String> = Vec::new();
        loop {
            let Some(name) = alias_target(&current) else {
                return Ok(current);
            };
            if self.contract(name).is_declared() {
                return Ok(current);
            }
            let Some(Decl::Alias(target)) = self.ns.lookup(name) else {
                return Ok(current);
            };
            let looped = chain.iter().any(|n| n == name);
            chain.push(name.to_owned());
            if looped {
                return Err(GenError::RecursiveSchema { path: chain });
            }
            current = target.clone();
        }
    }

    /// Builds the schema of a struct declaration.
    pub fn schema_of(&self, decl: &StructDecl) -> GenResult<TypeSchema> {
        let mut fields = Vec::with_capacity(decl.fields.len());
        for f in &decl.fields {
            let optional = !f.skip && self.follow_aliases(&f.ty)?.single_arg("Option").is_some();
            fields.push(FieldSchema {
                member: f.member.clone(),
                ty: f.ty.clone(),
                optional,
                skip: f.skip,
            });
        }
        Ok(TypeSchema {
            name: decl.name.clone(),
            tuple: decl.tuple,
            fields,
        })
    }
}
