/// One curated article in the built-in knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub key: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    pub keywords: &'static [&'static str],
}

pub(crate) const ENTRIES: [KnowledgeEntry; 7] = [
    KnowledgeEntry {
        key: "7qc_tools",
        title: "7 Quality Control (7QC) Tools",
        content: r"The 7QC tools are fundamental statistical tools for quality improvement:

**1. Check Sheet**
- Purpose: Systematic data collection and defect tracking
- Use when: You need to collect and organize data
- Benefits: Standardized data collection, trend identification

**2. Histogram**
- Purpose: Shows frequency distribution of data
- Use when: Understanding process variation and capability
- Benefits: Visual representation of data patterns

**3. Pareto Chart**
- Purpose: Identifies vital few problems (80/20 rule)
- Use when: Prioritizing improvement efforts
- Benefits: Focuses resources on most impactful issues

**4. Cause & Effect Diagram (Fishbone/Ishikawa)**
- Purpose: Systematic root cause analysis
- Use when: Investigating problem causes
- Benefits: Comprehensive cause identification, team engagement

**5. Scatter Diagram**
- Purpose: Shows relationships between variables
- Use when: Testing correlations between factors
- Benefits: Identifies cause-effect relationships

**6. Control Chart**
- Purpose: Monitors process stability over time
- Use when: Ongoing process monitoring and control
- Benefits: Early detection of process changes

**7. Stratification**
- Purpose: Analyzes data by grouping similar items
- Use when: Comparing different groups or categories
- Benefits: Reveals hidden patterns in data",
        keywords: &["7qc", "quality control", "tools", "statistical", "basic tools"],
    },
    KnowledgeEntry {
        key: "defect_reduction",
        title: "Defect Reduction Strategy",
        content: r"**Systematic Approach to Reduce Manufacturing Defects:**

**Phase 1: Data Collection (Week 1-2)**
- Use Check Sheets to track defect types, frequency, and location
- Collect data for at least 2 weeks to establish baseline
- Categories: Material, Machine, Method, Measurement, Environment, People

**Phase 2: Analysis (Week 3)**
- Create Pareto Chart to identify top 3-5 defect types
- Focus on defects causing 80% of problems
- Use Histograms to understand defect distribution patterns

**Phase 3: Root Cause Analysis (Week 4)**
- Cause & Effect Diagram for major defects
- 5 Whys technique for deeper investigation
- Scatter Diagrams to test relationships

**Phase 4: Solution Implementation (Week 5-8)**
- PDCA Cycle for systematic improvement
- Poka-Yoke (error proofing) techniques
- Standard Operating Procedures (SOPs)

**Phase 5: Control & Monitoring (Ongoing)**
- Control Charts for process monitoring
- Regular audits and reviews
- Continuous improvement culture

**Expected Results:** 40-60% defect reduction within 3 months",
        keywords: &[
            "defect",
            "defects",
            "manufacturing",
            "reduce",
            "quality issues",
            "problems",
        ],
    },
    KnowledgeEntry {
        key: "customer_satisfaction",
        title: "Customer Satisfaction Improvement",
        content: r"**Customer Satisfaction Enhancement Strategy:**

**1. Voice of Customer (VoC) Collection**
- Surveys, interviews, focus groups
- Complaint analysis and feedback systems
- Social media monitoring
- Customer journey mapping

**2. Data Analysis Tools**
- Pareto Chart: Prioritize top customer issues
- Check Sheets: Track complaint categories
- Stratification: Analyze by customer segments
- Scatter Diagrams: Link satisfaction to specific factors

**3. Root Cause Analysis**
- Cause & Effect Diagram for major complaints
- 5 Whys for service failures
- Process mapping to identify pain points

**4. Improvement Actions**
- Service level agreements (SLAs)
- Employee training programs
- Process standardization
- Customer communication protocols

**5. Monitoring & Control**
- Customer satisfaction metrics (CSAT, NPS)
- Control Charts for key performance indicators
- Regular customer feedback loops
- Continuous improvement initiatives

**Key Metrics:**
- Customer Satisfaction Score (CSAT): Target >85%
- Net Promoter Score (NPS): Target >50
- Customer Retention Rate: Target >90%
- First Call Resolution: Target >80%",
        keywords: &[
            "customer",
            "satisfaction",
            "service",
            "feedback",
            "complaints",
            "nps",
            "csat",
        ],
    },
    KnowledgeEntry {
        key: "process_improvement",
        title: "Process Improvement Methodology",
        content: r"**PDCA Cycle for Process Improvement:**

**PLAN (25% of effort)**
- Define problem clearly with data
- Set SMART objectives
- Analyze root causes using quality tools
- Develop improvement plan with timelines

**DO (25% of effort)**
- Implement on small scale (pilot)
- Train team members
- Execute according to plan
- Document all activities

**CHECK (25% of effort)**
- Measure results against objectives
- Use Control Charts for monitoring
- Analyze data for improvement verification
- Compare before/after performance

**ACT (25% of effort)**
- Standardize successful improvements
- Update procedures and training
- Share lessons learned
- Plan next improvement cycle

**Supporting Tools:**
- Kaizen events for rapid improvement
- Value Stream Mapping for workflow optimization
- Lean principles for waste elimination
- Six Sigma for data-driven improvements

**Success Factors:**
- Leadership commitment
- Employee engagement
- Data-driven decisions
- Continuous learning culture",
        keywords: &[
            "process",
            "improvement",
            "pdca",
            "kaizen",
            "lean",
            "optimize",
            "efficiency",
        ],
    },
    KnowledgeEntry {
        key: "dpdp_compliance",
        title: "DPDP (Data Protection) Compliance",
        content: r"**Digital Personal Data Protection (DPDP) Compliance for Organizations:**

**Key Requirements:**
1. **Data Minimization**: Collect only necessary personal data
2. **Purpose Limitation**: Use data only for stated purposes
3. **Consent Management**: Obtain clear, informed consent
4. **Data Security**: Implement appropriate security measures
5. **Data Subject Rights**: Respect individual privacy rights

**Implementation Steps:**

**Phase 1: Assessment (Month 1)**
- Data mapping and inventory
- Privacy impact assessments
- Gap analysis against DPDP requirements
- Risk identification and evaluation

**Phase 2: Policy Development (Month 2)**
- Privacy policy creation
- Data handling procedures
- Consent management processes
- Incident response plans

**Phase 3: Technical Implementation (Month 3-4)**
- Security controls implementation
- Data encryption and access controls
- Monitoring and audit systems
- Staff training programs

**Phase 4: Ongoing Compliance (Ongoing)**
- Regular audits and assessments
- Policy updates and reviews
- Incident management
- Continuous improvement

**For Startups & MSMEs:**
- Start with basic compliance framework
- Use simplified templates and checklists
- Focus on high-risk data processing activities
- Leverage technology solutions for automation",
        keywords: &[
            "dpdp",
            "data protection",
            "privacy",
            "compliance",
            "gdpr",
            "personal data",
        ],
    },
    KnowledgeEntry {
        key: "six_sigma",
        title: "Six Sigma Methodology",
        content: r"**Six Sigma DMAIC Process:**

**DEFINE (Month 1)**
- Project charter and scope
- Voice of Customer (VoC)
- Critical-to-Quality (CTQ) characteristics
- Project team formation

**MEASURE (Month 2)**
- Data collection plan
- Baseline performance measurement
- Measurement system analysis
- Process capability assessment

**ANALYZE (Month 3)**
- Root cause analysis
- Statistical analysis of data
- Process mapping and value stream analysis
- Hypothesis testing

**IMPROVE (Month 4-5)**
- Solution generation and selection
- Pilot implementation
- Design of Experiments (DOE)
- Risk assessment

**CONTROL (Month 6)**
- Control plan development
- Process monitoring systems
- Documentation and training
- Handover to process owner

**Benefits:**
- 99.99966% defect-free performance
- 3.4 defects per million opportunities
- Significant cost savings (typically 1-3% of revenue)
- Cultural transformation toward quality

**When to Use:**
- Complex, high-impact problems
- Data-rich environments
- Strategic improvement initiatives
- When statistical analysis is needed",
        keywords: &[
            "six sigma",
            "dmaic",
            "statistical",
            "defects per million",
            "process capability",
        ],
    },
    KnowledgeEntry {
        key: "root_cause_analysis",
        title: "Root Cause Analysis Techniques",
        content: r#"**Root Cause Analysis Toolkit:**

**1. 5 Whys Technique**
- Start with problem statement
- Ask "Why?" five times
- Dig deeper with each question
- Stop when you reach actionable root cause
- Example: Defect → Why? → Machine settings → Why? → No calibration → Why? → No schedule → Why? → No procedure → Why? → No training

**2. Cause & Effect Diagram (Fishbone)**
- Categories: Man, Machine, Material, Method, Environment, Measurement
- Brainstorm all potential causes
- Use team-based approach
- Verify causes with data

**3. Fault Tree Analysis**
- Top-down logical analysis
- Start with undesired event
- Work backward to find causes
- Use boolean logic (AND/OR gates)

**4. Current Reality Tree**
- Systems thinking approach
- Identify core problems
- Map cause-effect relationships
- Find leverage points for improvement

**Best Practices:**
- Use multiple techniques together
- Involve cross-functional teams
- Support with data and evidence
- Focus on process, not people
- Document lessons learned
- Implement permanent solutions

**Common Mistakes to Avoid:**
- Stopping at symptoms
- Blaming individuals
- Not validating root causes
- Implementing quick fixes only"#,
        keywords: &[
            "root cause",
            "analysis",
            "5 whys",
            "fishbone",
            "investigate",
            "problem solving",
        ],
    },
];

/// Loose patterns for the plain matcher, checked in order; the first hit picks the entry
pub(crate) const BASIC_PATTERNS: [(&str, &[&str]); 7] = [
    (
        "7qc_tools",
        &[r"7qc", r"seven.*quality", r"basic.*tools", r"quality.*control.*tools"],
    ),
    (
        "defect_reduction",
        &[
            r"defect",
            r"manufacturing.*problem",
            r"quality.*issue",
            r"reduce.*defect",
        ],
    ),
    (
        "customer_satisfaction",
        &[
            r"customer.*satisfaction",
            r"customer.*feedback",
            r"service.*quality",
            r"nps",
            r"csat",
        ],
    ),
    (
        "process_improvement",
        &[
            r"process.*improve",
            r"pdca",
            r"kaizen",
            r"lean",
            r"optimize.*process",
        ],
    ),
    (
        "dpdp_compliance",
        &[r"dpdp", r"data.*protection", r"privacy", r"compliance", r"gdpr"],
    ),
    (
        "six_sigma",
        &[
            r"six.*sigma",
            r"dmaic",
            r"statistical.*quality",
            r"process.*capability",
        ],
    ),
    (
        "root_cause_analysis",
        &[
            r"root.*cause",
            r"5.*whys",
            r"fishbone",
            r"investigate",
            r"problem.*solving",
        ],
    ),
];

pub(crate) const DEFAULT_TIPS: &[&str] = &[
    "Start with small pilot implementations",
    "Measure before and after results",
    "Get stakeholder buy-in early",
];

/// Practical tips for the entries that have their own
pub(crate) fn tips_for(key: &str) -> &'static [&'static str] {
    match key {
        "7qc_tools" => &[
            "Start with check sheets for data collection",
            "Use Pareto charts to prioritize problems",
            "Implement control charts for ongoing monitoring",
        ],
        "defect_reduction" => &[
            "Focus on prevention rather than detection",
            "Engage operators in problem identification",
            "Document all improvements for sustainability",
        ],
        "process_improvement" => &[
            "Map current state before making changes",
            "Involve stakeholders in the improvement process",
            "Measure results to validate improvements",
        ],
        _ => DEFAULT_TIPS,
    }
}

pub(crate) fn quick_actions_for(topic_key: &str) -> &'static [&'static str] {
    match topic_key {
        "7qc_tools" => &[
            "Download check sheet templates",
            "Practice creating Pareto charts",
            "Set up basic control charts",
        ],
        "defect_reduction" => &[
            "Start collecting defect data",
            "Identify top 3 defect types",
            "Form improvement team",
        ],
        "process_improvement" => &[
            "Map your current process",
            "Identify bottlenecks",
            "Plan improvement pilot",
        ],
        _ => &[
            "Assess current situation",
            "Define improvement goals",
            "Create action plan",
        ],
    }
}

pub(crate) const CONSIDERATIONS: &str = "- Ensure adequate training for team members
- Allocate sufficient time for proper implementation
- Have management support and commitment
- Plan for resistance to change management";

pub(crate) const KEY_POINTS: &str = "- Focus on data-driven decision making
- Implement systematic approaches
- Ensure continuous monitoring and improvement
- Engage all stakeholders in the process";

pub(crate) const DEFAULT_DEFINITION: &str =
    "Key quality management concept for process improvement.";

pub(crate) const DEFAULT_STEPS: &str = "1. Analyze current situation
2. Identify improvement opportunities
3. Implement changes
4. Monitor results";

pub(crate) const DEFAULT_BENEFITS: &str = "- Improved quality and efficiency
- Reduced costs and waste
- Enhanced customer satisfaction
- Better process control";
