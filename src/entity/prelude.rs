//! 预导入模块，方便使用

pub use super::accounts::{
    ActiveModel as AccountActiveModel, Entity as Accounts, Model as AccountModel,
};
pub use super::mapping_infos::{
    ActiveModel as MappingInfoActiveModel, Entity as MappingInfos, Model as MappingInfoModel,
};
pub use super::mapping_pairs::{
    ActiveModel as MappingPairActiveModel, Entity as MappingPairs, Model as MappingPairModel,
};
pub use super::parsed_files::{
    ActiveModel as ParsedFileActiveModel, Entity as ParsedFiles, Model as ParsedFileModel,
};
pub use super::participations::{
    ActiveModel as ParticipationActiveModel, Entity as Participations,
    Model as ParticipationModel,
};
pub use super::schema_attributes::{
    ActiveModel as SchemaAttributeActiveModel, Entity as SchemaAttributes,
    Model as SchemaAttributeModel,
};
pub use super::tasks::{ActiveModel as TaskActiveModel, Entity as Tasks, Model as TaskModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
