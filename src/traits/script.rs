use crate::external::ExternalTrait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::objects::ObjectId;
use crate::traits::Trait;
use crate::error::Result;

/// A link to a plugin source file driving an object.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ScriptCodeLink {
	pub name: String,
	pub filepath: String,
}

/// The scripts attached to an object, keyed by name.
#[derive(Trait, Clone, Debug, Default)]
#[trait_index(4)]
pub struct Script {
	object: ObjectId,
	code_links: BTreeMap<String, ScriptCodeLink>,
}

impl Script {
	pub fn code_links(&self) -> &BTreeMap<String, ScriptCodeLink> {
		&self.code_links
	}

	/// Link a script, replacing any link with the same name.
	pub fn link(&mut self, name: impl Into<String>, filepath: impl Into<String>) -> Option<ScriptCodeLink> {
		let name = name.into();
		let link = ScriptCodeLink {
			name: name.clone(),
			filepath: filepath.into(),
		};
		self.code_links.insert(name, link)
	}

	pub fn unlink(&mut self, name: &str) -> Option<ScriptCodeLink> {
		self.code_links.remove(name)
	}

	pub fn is_linked(&self, name: &str) -> bool {
		self.code_links.contains_key(name)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptRecord {
	pub code_links: Vec<ScriptCodeLink>,
}

impl ExternalTrait for Script {
	type Record = ScriptRecord;

	fn to_external(&self) -> ScriptRecord {
		ScriptRecord {
			code_links: self.code_links.values().cloned().collect(),
		}
	}

	fn from_external(record: ScriptRecord, object: ObjectId) -> Result<Self> {
		let code_links = record
			.code_links
			.into_iter()
			.map(|link| (link.name.clone(), link))
			.collect();

		Ok(Script { object, code_links })
	}
}
