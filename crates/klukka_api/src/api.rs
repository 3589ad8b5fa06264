//! Typed endpoint wrappers. Absent payloads map to the defaults the UI expects.

use crate::error::Result;
use crate::export::ExportFile;
use crate::models::{
    AdminData, AnalysisData, ArchiveId, DepInfo, ExportFilter, Group, GroupDetails, GroupToUser,
    IdTupel, PasswordReset, PrivacyInfo, Project, ReportingWindow, Role, Start, TrackedInterval,
    User, UserApiToken, UserData, UserProjects,
};
use crate::session::{KlukkaApi, Navigator};

const UNKNOWN_VERSION: &str = "n/a";
const GROUP_INVITE_FAILED: &str = "Something went wrong";

impl<N: Navigator> KlukkaApi<N> {
    pub async fn version(&self) -> Result<String> {
        Ok(self
            .get_payload::<String>("version")
            .await?
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string()))
    }

    pub async fn user_role(&self) -> Result<Role> {
        Ok(self.get_payload::<Role>("role").await?.unwrap_or_default())
    }

    pub async fn admin_data(&self) -> Result<Option<AdminData>> {
        self.get_payload("admin").await
    }

    /// Creates a personal project and returns its id.
    pub async fn add_project(&self, project: &Project) -> Result<Option<i64>> {
        self.post_payload("add", project).await
    }

    pub async fn projects(&self) -> Result<Option<UserProjects>> {
        self.get_payload("projects").await
    }

    /// The currently running interval, if any.
    pub async fn active(&self) -> Result<Option<TrackedInterval>> {
        self.post_payload("active", &()).await
    }

    pub async fn start_tracking(&self, start: &Start) -> Result<bool> {
        self.post_flag("start", start).await
    }

    pub async fn delete_tracking(&self, tracked_id: i64) -> Result<bool> {
        self.post_flag("delete", &tracked_id).await
    }

    pub async fn stop_tracking(&self, project_id: i64) -> Result<bool> {
        self.post_flag("stop", &project_id).await
    }

    /// Minutes tracked in the current month.
    pub async fn month_minutes(&self) -> Result<i64> {
        Ok(self.post_payload::<_, i64>("month", &()).await?.unwrap_or(0))
    }

    pub async fn admin_invite(&self, user: &User) -> Result<bool> {
        self.post_flag("admin/invite", user).await
    }

    pub async fn admin_delete_user(&self, user_id: i64) -> Result<bool> {
        self.post_flag("admin/deleteUser", &user_id).await
    }

    pub async fn admin_update_role(&self, user: &User) -> Result<bool> {
        self.post_flag("admin/updateRole", user).await
    }

    pub async fn delete_project(&self, project_id: i64) -> Result<bool> {
        self.post_flag("deleteProject", &project_id).await
    }

    pub async fn groups(&self) -> Result<Vec<Group>> {
        Ok(self.get_payload::<Vec<Group>>("group").await?.unwrap_or_default())
    }

    pub async fn create_group(&self, group: &Group) -> Result<bool> {
        self.post_flag("group/create", group).await
    }

    pub async fn delete_group(&self, group_id: i64) -> Result<bool> {
        self.post_flag("group/deleteGroup", &group_id).await
    }

    pub async fn group_details(&self, group_id: i64) -> Result<Option<GroupDetails>> {
        self.post_payload("group/details", &group_id).await
    }

    /// Invites a user by mail. The backend answers with a human readable status message.
    pub async fn invite_to_group(&self, invite: &GroupToUser) -> Result<String> {
        Ok(self
            .post_payload::<_, String>("group/invite", invite)
            .await?
            .unwrap_or_else(|| GROUP_INVITE_FAILED.to_string()))
    }

    pub async fn remove_from_group(&self, member: &GroupToUser) -> Result<bool> {
        self.post_flag("group/remove", member).await
    }

    pub async fn update_group(&self, group: &Group) -> Result<bool> {
        self.post_flag("group/update", group).await
    }

    pub async fn add_project_to_group(&self, project: &Project) -> Result<bool> {
        self.post_flag("group/addProject", project).await
    }

    pub async fn delete_project_from_group(&self, link: &IdTupel) -> Result<bool> {
        self.post_flag("group/deleteProject", link).await
    }

    pub async fn analysis_data(&self, window: &ReportingWindow) -> Result<Option<AnalysisData>> {
        self.post_payload("data", window).await
    }

    pub async fn group_analysis_data(
        &self,
        window: &ReportingWindow,
    ) -> Result<Option<AnalysisData>> {
        self.post_payload("group/data", window).await
    }

    pub async fn update_password(&self, password: &str) -> Result<bool> {
        self.post_flag("user/updatePassword", password).await
    }

    pub async fn update_email(&self, mail: &str) -> Result<bool> {
        self.post_flag("user/changeMail", mail).await
    }

    pub async fn delete_account(&self) -> Result<bool> {
        Ok(self.get_payload::<bool>("user/delete").await?.unwrap_or(false))
    }

    pub async fn leave_group(&self, group_id: i64) -> Result<bool> {
        self.post_flag("user/leaveGroup", &group_id).await
    }

    pub async fn update_tracking(&self, tracked: &TrackedInterval) -> Result<bool> {
        self.post_flag("update", tracked).await
    }

    pub async fn user_details(&self) -> Result<Option<UserData>> {
        self.get_payload("user/data").await
    }

    pub async fn reset_password(&self, mail: &str) -> Result<bool> {
        self.post_flag("login/reset", mail).await
    }

    pub async fn check_reset_token(&self, token: &str) -> Result<bool> {
        self.post_flag("login/check", token).await
    }

    pub async fn reset_password_by_token(&self, reset: &PasswordReset) -> Result<bool> {
        self.post_flag("login/token", reset).await
    }

    pub async fn set_project_archive(&self, archive: &ArchiveId) -> Result<bool> {
        self.post_flag("archive", archive).await
    }

    pub async fn update_project(&self, project: &Project) -> Result<bool> {
        self.post_flag("edit", project).await
    }

    pub async fn delete_user_token(&self, token_id: i64) -> Result<bool> {
        self.post_flag("user/deleteToken", &token_id).await
    }

    /// Creates an API token and returns its secret value, which is only shown once.
    pub async fn create_user_token(&self, details: &UserApiToken) -> Result<Option<String>> {
        self.post_payload("user/createToken", details).await
    }

    pub async fn dependency_info(&self) -> Result<Option<DepInfo>> {
        self.get_payload("info").await
    }

    pub async fn privacy_info(&self) -> Result<Option<PrivacyInfo>> {
        self.get_payload("privacy").await
    }

    pub async fn update_privacy_info(&self, info: &PrivacyInfo) -> Result<bool> {
        self.post_flag("admin/setPrivacy", info).await
    }

    /// Downloads a CSV export, scoped to a group when a positive group id is given.
    pub async fn download_export(
        &self,
        filter: &ExportFilter,
        group_id: Option<i64>,
    ) -> Result<Option<ExportFile>> {
        let outcome = match group_id.filter(|id| *id > 0) {
            Some(id) => {
                let mut scoped = filter.clone();
                scoped.group_id = Some(id);
                self.client().post_binary("group/export", &scoped).await?
            }
            None => self.client().post_binary("export", filter).await?,
        };
        self.resolve(outcome)
    }
}
