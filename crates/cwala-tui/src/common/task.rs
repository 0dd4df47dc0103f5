use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// One kind per API call the dashboard can have in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Login,
    Register,
    VerifyOtp,
    SendReset,
    ResetPassword,
    Logout,
    ApprovalPoll,
    ProfileFetch,
    ProfileUpdate,
    PasswordChange,
    TeamFetch,
    MemberAdd,
    MemberRemove,
    WalletFetch,
    NotificationsFetch,
}

impl TaskKind {
    /// Short label for the status line while the call is running.
    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Login => "Signing in",
            TaskKind::Register => "Creating account",
            TaskKind::VerifyOtp => "Verifying code",
            TaskKind::SendReset => "Sending reset code",
            TaskKind::ResetPassword => "Resetting password",
            TaskKind::Logout => "Signing out",
            TaskKind::ApprovalPoll => "Checking approval",
            TaskKind::ProfileFetch => "Loading profile",
            TaskKind::ProfileUpdate => "Saving profile",
            TaskKind::PasswordChange => "Changing password",
            TaskKind::TeamFetch => "Loading team",
            TaskKind::MemberAdd => "Adding member",
            TaskKind::MemberRemove => "Removing member",
            TaskKind::WalletFetch => "Loading balance",
            TaskKind::NotificationsFetch => "Loading notifications",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
        self.cancel = started.cancel.clone();
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub register: TaskState,
    pub verify_otp: TaskState,
    pub send_reset: TaskState,
    pub reset_password: TaskState,
    pub logout: TaskState,
    pub approval_poll: TaskState,
    pub profile_fetch: TaskState,
    pub profile_update: TaskState,
    pub password_change: TaskState,
    pub team_fetch: TaskState,
    pub member_add: TaskState,
    pub member_remove: TaskState,
    pub wallet_fetch: TaskState,
    pub notifications_fetch: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Login => &mut self.login,
            TaskKind::Register => &mut self.register,
            TaskKind::VerifyOtp => &mut self.verify_otp,
            TaskKind::SendReset => &mut self.send_reset,
            TaskKind::ResetPassword => &mut self.reset_password,
            TaskKind::Logout => &mut self.logout,
            TaskKind::ApprovalPoll => &mut self.approval_poll,
            TaskKind::ProfileFetch => &mut self.profile_fetch,
            TaskKind::ProfileUpdate => &mut self.profile_update,
            TaskKind::PasswordChange => &mut self.password_change,
            TaskKind::TeamFetch => &mut self.team_fetch,
            TaskKind::MemberAdd => &mut self.member_add,
            TaskKind::MemberRemove => &mut self.member_remove,
            TaskKind::WalletFetch => &mut self.wallet_fetch,
            TaskKind::NotificationsFetch => &mut self.notifications_fetch,
        }
    }

    /// First running kind, used for the status line spinner label.
    pub fn running_kind(&self) -> Option<TaskKind> {
        const ALL: [TaskKind; 15] = [
            TaskKind::Login,
            TaskKind::Register,
            TaskKind::VerifyOtp,
            TaskKind::SendReset,
            TaskKind::ResetPassword,
            TaskKind::Logout,
            TaskKind::ApprovalPoll,
            TaskKind::ProfileFetch,
            TaskKind::ProfileUpdate,
            TaskKind::PasswordChange,
            TaskKind::TeamFetch,
            TaskKind::MemberAdd,
            TaskKind::MemberRemove,
            TaskKind::WalletFetch,
            TaskKind::NotificationsFetch,
        ];
        ALL.into_iter().find(|kind| self.state(*kind).is_running())
    }

    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Login => &self.login,
            TaskKind::Register => &self.register,
            TaskKind::VerifyOtp => &self.verify_otp,
            TaskKind::SendReset => &self.send_reset,
            TaskKind::ResetPassword => &self.reset_password,
            TaskKind::Logout => &self.logout,
            TaskKind::ApprovalPoll => &self.approval_poll,
            TaskKind::ProfileFetch => &self.profile_fetch,
            TaskKind::ProfileUpdate => &self.profile_update,
            TaskKind::PasswordChange => &self.password_change,
            TaskKind::TeamFetch => &self.team_fetch,
            TaskKind::MemberAdd => &self.member_add,
            TaskKind::MemberRemove => &self.member_remove,
            TaskKind::WalletFetch => &self.wallet_fetch,
            TaskKind::NotificationsFetch => &self.notifications_fetch,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.running_kind().is_some()
    }
}
